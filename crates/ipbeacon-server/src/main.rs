//! ipbeacon server
//!
//! - `POST /update` with `{"key": "...", "ip": "..."}` stores the latest ip
//! - `GET /` reports it with the update time in IST
//!
//! Config path comes from `IPBEACON_CONFIG` (default `ipbeacon.yaml`); the
//! shared secret from the env var named by `auth.secret_env`.

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ipbeacon_core::error::{BeaconError, Result};
use ipbeacon_server::{app_state::AppState, config, router};

const CONFIG_ENV: &str = "IPBEACON_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "ipbeacon.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "ipbeacon-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = config::load_or_default(&path)?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| BeaconError::Config(format!("server.listen: {e}")))?;

    let state = AppState::from_settings(&cfg).await?;
    let app = router::build_router(state);

    tracing::info!(%listen, "ipbeacon-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| BeaconError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BeaconError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}
