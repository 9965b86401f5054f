use crate::adapters::PmsClient;
use crate::config::RappConfig;
use crate::core::StartupStatus;
use crate::utils::metrics::RappMetrics;
use std::sync::Arc;

/// axum handler 共用的狀態；全部都是唯讀或內部同步的
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RappConfig>,
    pub pms: Arc<PmsClient>,
    pub metrics: RappMetrics,
    pub startup: StartupStatus,
}

impl AppState {
    pub fn new(
        config: Arc<RappConfig>,
        pms: Arc<PmsClient>,
        metrics: RappMetrics,
        startup: StartupStatus,
    ) -> Self {
        Self {
            config,
            pms,
            metrics,
            startup,
        }
    }
}
