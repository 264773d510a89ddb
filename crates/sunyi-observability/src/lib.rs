//! Sunyi Observability
//!
//! Provides configurable observability features including:
//! - Structured logging to console and rolling files
//! - Distributed tracing via OpenTelemetry
//! - Metrics collection via Prometheus, including auth and gig counters
//!
//! Everything past console logging sits behind the `observability` feature
//! (on by default). At runtime it can be switched off with
//! `OBSERVABILITY_ENABLED=false`, in which case [`init_basic_console_logging`]
//! is used instead of `init_tracing`.
//!
//! # Examples
//!
//! ```no_run
//! use sunyi_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

pub mod basic_logging;
mod switch;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;
pub use switch::{is_observability_enabled, set_observability_enabled};

// Re-export PrometheusHandle type when observability is enabled
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use self::logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, metrics_app, metrics_middleware, track_authorization_denial, track_gig_created,
    track_token_issued, track_token_rejection, track_user_login_failure, track_user_login_success,
    track_user_registered,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    /// No-op logging middleware when feature disabled
    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// No-op metrics middleware when feature disabled
    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Falls back to console logging when feature disabled
    pub fn init_tracing() -> anyhow::Result<()> {
        crate::init_basic_console_logging();
        Ok(())
    }

    /// No-op tracer shutdown when feature disabled
    pub async fn shutdown_tracer() {}

    // No-op tracking functions
    pub fn track_user_registered(_role: &str) {}
    pub fn track_user_login_success(_role: &str) {}
    pub fn track_user_login_failure(_reason: &str) {}
    pub fn track_token_issued() {}
    pub fn track_token_rejection(_reason: &str) {}
    pub fn track_authorization_denial(_reason: &str) {}
    pub fn track_gig_created() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
