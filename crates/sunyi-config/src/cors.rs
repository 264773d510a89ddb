use crate::{env_var, lookup};

const DEFAULT_ORIGINS: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup<F>(get: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup(get, "ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_are_split_and_trimmed() {
        let config = CorsConfig::from_lookup(&|_: &str| {
            Some("https://sunyi.app, https://admin.sunyi.app,,".to_string())
        });
        assert_eq!(
            config.allowed_origins,
            vec!["https://sunyi.app", "https://admin.sunyi.app"]
        );
    }
}
