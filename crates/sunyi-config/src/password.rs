use crate::{ConfigError, env_var, lookup};

pub const DEFAULT_BCRYPT_COST: u32 = 12;
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup<F>(get: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(raw) = lookup(get, "BCRYPT_COST") else {
            return Ok(Self::default());
        };

        let cost: u32 = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid("BCRYPT_COST", &raw, "not a number"))?;

        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_COST",
                &raw,
                format!("must be between {} and {}", MIN_COST, MAX_COST),
            ));
        }

        Ok(Self { bcrypt_cost: cost })
    }
}
