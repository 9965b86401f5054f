use crate::adapters::PmsClient;
use crate::app::router::create_router;
use crate::app::state::AppState;
use crate::config::RappConfig;
use crate::core::{StartupOrchestrator, StartupState, StartupStatus};
use crate::utils::error::{RappError, Result};
use crate::utils::metrics::RappMetrics;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 啟動後的 rApp：HTTP 伺服器與背景 handshake 各自一個 task
pub struct RunningRapp {
    pub local_addr: SocketAddr,
    pub startup: StartupStatus,
    pub metrics: RappMetrics,
    pub server: JoinHandle<Result<()>>,
    pub orchestrator: JoinHandle<StartupState>,
}

/// 在已 bind 的 listener 上開始服務，然後才把 handshake 丟到背景
pub fn launch<F>(config: Arc<RappConfig>, listener: TcpListener, shutdown: F) -> Result<RunningRapp>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics = RappMetrics::new()?;
    let pms = Arc::new(PmsClient::new(metrics.clone())?);

    let orchestrator = StartupOrchestrator::new(pms.clone(), config.clone());
    let startup = orchestrator.status();

    let router = create_router(AppState::new(config, pms, metrics.clone(), startup.clone()));
    let local_addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RappError::ServerError {
                message: e.to_string(),
            })
    });

    let orchestrator = orchestrator.spawn();

    Ok(RunningRapp {
        local_addr,
        startup,
        metrics,
        server,
        orchestrator,
    })
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down");
        }
    }
}
