pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::PmsClient;
pub use crate::app::{create_router, launch, AppState, RunningRapp};
pub use crate::config::{cli::CliArgs, RappConfig};
pub use crate::core::{PolicyManagement, StartupOrchestrator, StartupState, StartupStatus};
pub use crate::utils::error::{RappError, Result};
pub use crate::utils::metrics::RappMetrics;
