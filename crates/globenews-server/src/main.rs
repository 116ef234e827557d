mod api;
mod middleware;
mod scheduler;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use crate::api::{build_app, AppState};
use crate::scheduler::EnrichmentScheduler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = globenews_core::load_app_config()?;
    globenews_core::logging::init(&config)?;
    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting globenews server");

    let pool_config = globenews_db::PoolConfig::from_app_config(&config);
    let pool = globenews_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = globenews_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied database migrations");
    }

    let pipeline = Arc::new(globenews_pipeline::build_pipeline(&config, pool)?);
    let interval = Duration::from_secs(config.extract_interval_mins * 60);
    let scheduler = EnrichmentScheduler::start(Arc::clone(&pipeline), interval).await?;

    let app = build_app(AppState {
        store: pipeline.store(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
