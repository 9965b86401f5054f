use crate::config::RappConfig;
use crate::domain::model::StartupState;
use crate::domain::ports::PolicyManagement;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// 唯讀的啟動狀態，給 HTTP handler 與測試查詢
#[derive(Debug, Clone)]
pub struct StartupStatus {
    rx: watch::Receiver<StartupState>,
}

impl StartupStatus {
    pub fn current(&self) -> StartupState {
        *self.rx.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.current() == StartupState::Done
    }

    /// 等到 `Done` 或 `Failed`
    pub async fn wait_terminal(&self) -> StartupState {
        let mut rx = self.rx.clone();
        if let Ok(state) = rx.wait_for(|state| state.is_terminal()).await {
            return *state;
        }
        let state = *rx.borrow();
        state
    }
}

/// 註冊服務，接著送出 policy；任何一步失敗就停在 `Failed`，不重試
pub struct StartupOrchestrator<P: PolicyManagement> {
    pms: Arc<P>,
    config: Arc<RappConfig>,
    state_tx: watch::Sender<StartupState>,
}

impl<P: PolicyManagement + 'static> StartupOrchestrator<P> {
    pub fn new(pms: Arc<P>, config: Arc<RappConfig>) -> Self {
        let (state_tx, _) = watch::channel(StartupState::Idle);
        Self {
            pms,
            config,
            state_tx,
        }
    }

    pub fn status(&self) -> StartupStatus {
        StartupStatus {
            rx: self.state_tx.subscribe(),
        }
    }

    pub async fn run(self) -> StartupState {
        tracing::info!(
            "🚀 Starting control-plane handshake (service={}, ric={}, policy={})",
            self.config.service_id,
            self.config.ric_id,
            self.config.policy_id
        );

        self.transition(StartupState::Registering);
        if let Err(e) = self.pms.register(&self.config).await {
            tracing::error!("❌ Startup tasks failed: register service: {}", e);
            return self.transition(StartupState::Failed);
        }

        self.transition(StartupState::SubmittingPolicy);
        if let Err(e) = self.pms.submit_policy(&self.config).await {
            tracing::error!("❌ Startup tasks failed: put policy: {}", e);
            return self.transition(StartupState::Failed);
        }

        tracing::info!("✅ Control-plane handshake completed");
        self.transition(StartupState::Done)
    }

    /// 丟到背景執行，不擋住 listener
    pub fn spawn(self) -> JoinHandle<StartupState> {
        tokio::spawn(self.run())
    }

    fn transition(&self, next: StartupState) -> StartupState {
        let previous = self.state_tx.send_replace(next);
        tracing::debug!("Startup state: {} -> {}", previous, next);
        next
    }
}
