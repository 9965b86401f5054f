pub mod orchestrator;

pub use crate::domain::model::StartupState;
pub use crate::domain::ports::PolicyManagement;
pub use crate::utils::error::Result;
pub use orchestrator::{StartupOrchestrator, StartupStatus};
