use anyhow::Context;
use dotenvy::dotenv;
use sunyi::router::init_router;
use sunyi::state::AppState;
use sunyi_config::AppConfig;
use sunyi_db::{init_db_pool, run_migrations};
use sunyi_observability::{
    init_basic_console_logging, init_tracing, is_observability_enabled, set_observability_enabled,
    shutdown_tracer,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;

    set_observability_enabled(config.server.observability_enabled);
    if is_observability_enabled() {
        init_tracing()?;
    } else {
        init_basic_console_logging();
    }

    info!(
        environment = %config.server.environment,
        token_ttl_secs = config.jwt.ttl.as_secs(),
        bcrypt_cost = config.password.bcrypt_cost,
        "Starting Sunyi API"
    );

    let pool = init_db_pool(&config.database.url, config.database.max_connections)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let state = AppState::from_pool(pool, &config).context("failed to build token codec")?;

    #[cfg(feature = "observability")]
    spawn_metrics_server(config.server.metrics_port).await?;

    let app = init_router(state);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Server running on http://localhost:{}", config.server.port);
    info!(
        "Swagger UI available at http://localhost:{}/swagger-ui",
        config.server.port
    );
    info!(
        "Scalar UI available at http://localhost:{}/scalar",
        config.server.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    shutdown_tracer().await;
    Ok(())
}

#[cfg(feature = "observability")]
async fn spawn_metrics_server(port: u16) -> anyhow::Result<()> {
    let Some(handle) = sunyi_observability::init_metrics()? else {
        return Ok(());
    };

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind metrics listener {}", addr))?;
    info!("Metrics available at http://localhost:{}/metrics", port);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, sunyi_observability::metrics_app(handle)).await {
            error!(error = %e, "Metrics server stopped");
        }
    });

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
