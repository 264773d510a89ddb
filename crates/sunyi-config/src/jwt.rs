//! Token signing configuration.
//!
//! `JWT_SECRET` is required. `JWT_EXPIRATION` accepts either bare seconds
//! (`3600`) or a Go-style duration (`1h30m`, `1.5h`, `90m`, `45s`), must be
//! at least one second, and defaults to 24 hours.

use std::fmt;
use std::time::Duration;

use crate::{ConfigError, env_var, lookup};

pub const DEFAULT_EXPIRATION: &str = "24h";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl: Duration,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup<F>(get: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(get, "JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let raw = lookup(get, "JWT_EXPIRATION").unwrap_or_else(|| DEFAULT_EXPIRATION.to_string());
        let ttl = parse_duration(&raw)
            .map_err(|reason| ConfigError::invalid("JWT_EXPIRATION", &raw, reason))?;
        if ttl < Duration::from_secs(1) {
            return Err(ConfigError::invalid(
                "JWT_EXPIRATION",
                &raw,
                "token lifetime must be at least one second",
            ));
        }

        Ok(Self { secret, ttl })
    }
}

/// Parses a token lifetime.
///
/// Accepts bare seconds (`"3600"`) and the duration syntax of Go's
/// `time.ParseDuration`: a sequence of decimal numbers, each with an optional
/// fraction and a unit suffix, such as `"1h30m"`, `"1.5h"`, `"45s"` or
/// `"500ms"`. Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
/// Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    if s.starts_with('-') {
        return Err("negative durations are not allowed".to_string());
    }
    let mut rest = s.strip_prefix('+').unwrap_or(s);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let overflow = || "duration overflows".to_string();
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(format!("expected a number in `{}`", s));
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, next) = after.split_at(unit_len);
        if unit.is_empty() {
            return Err(format!("missing unit in `{}`", s));
        }
        let scale = unit_nanos(unit).ok_or_else(|| format!("unknown unit `{}`", unit))?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;

        // Digits past the 18th cannot change the result by a nanosecond.
        let fraction = &fraction[..fraction.len().min(18)];
        if !fraction.is_empty() {
            let numerator: u128 = fraction.parse().map_err(|_| overflow())?;
            let denominator = 10u128.pow(fraction.len() as u32);
            nanos = nanos
                .checked_add(numerator * scale / denominator)
                .ok_or_else(overflow)?;
        }

        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = next;
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| overflow())
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}
