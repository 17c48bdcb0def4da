use anyhow::anyhow;
use axum::serve;
use climate_api::{app, get_config_info, get_log_level, setup_logger, AppState, ClimateDb};
use futures::TryFutureExt;
use hawaii_climate_core::is_file;
use log::{error, info};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = get_config_info()?;
    let log_level = get_log_level(&cli);

    setup_logger()
        .level(log_level)
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("climate_api", log_level)
        .level_for("http_response", log_level)
        .level_for("http_request", log_level)
        .apply()?;

    let database = cli.database();
    let host = cli.host();
    let port = cli.port();

    if !is_file(&database) {
        return Err(anyhow!("climate database not found at {}", database));
    }

    let socket_addr = SocketAddr::from_str(&format!("{}:{}", host, port))
        .map_err(|e| anyhow!("invalid address: {}", e))?;

    let climate_db = ClimateDb::open(&database).await.map_err(|e| {
        error!("error opening climate database: {:#}", e);
        e
    })?;

    let listener = TcpListener::bind(socket_addr)
        .map_err(|e| anyhow!("error binding to socket: {}", e))
        .await?;

    info!("Hawaii Climate API starting...");
    info!("  Listen:   http://{}", socket_addr);
    info!("  Docs:     http://{}/docs", socket_addr);
    info!("  Database: {}", database);

    let app = app(AppState::new(Arc::new(climate_db.clone())));

    let served = serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    climate_db.close().await;
    served?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install signal handler: {}", e);
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

    info!("shutdown signal received, draining connections");
}
