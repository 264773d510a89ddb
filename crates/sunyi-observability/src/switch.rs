use std::sync::OnceLock;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Pins the runtime switch from loaded configuration. Only the first call
/// (or the first read) takes effect.
pub fn set_observability_enabled(enabled: bool) -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| enabled)
}

/// Check if observability is enabled. Falls back to the
/// `OBSERVABILITY_ENABLED` env var when nothing was set explicitly.
pub fn is_observability_enabled() -> bool {
    if !cfg!(feature = "observability") {
        return false;
    }

    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}
