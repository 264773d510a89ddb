use crate::{ConfigError, env_var, lookup};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub environment: String,
    pub observability_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            metrics_port: 9090,
            environment: "development".to_string(),
            observability_enabled: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup<F>(get: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            port: parse_port(get, "PORT", defaults.port)?,
            metrics_port: parse_port(get, "METRICS_PORT", defaults.metrics_port)?,
            environment: lookup(get, "ENV").unwrap_or(defaults.environment),
            observability_enabled: lookup(get, "OBSERVABILITY_ENABLED")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
                .unwrap_or(defaults.observability_enabled),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn parse_port<F>(get: &F, key: &'static str, default: u16) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(get, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(key, &raw, "not a valid port")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(&|_: &str| None).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.metrics_port, 9090);
        assert_eq!(config.environment, "development");
        assert!(config.observability_enabled);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(&|key: &str| match key {
            "PORT" => Some("3001".to_string()),
            "ENV" => Some("production".to_string()),
            "OBSERVABILITY_ENABLED" => Some("false".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.port, 3001);
        assert!(config.is_production());
        assert!(!config.observability_enabled);
    }

    #[test]
    fn test_bad_port() {
        let err = ServerConfig::from_lookup(&|key: &str| {
            (key == "PORT").then(|| "eighty".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
