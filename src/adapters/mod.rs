// Adapters layer: concrete implementations for external systems.

pub mod pms;

pub use pms::{PmsClient, PmsResponse, REQUEST_TIMEOUT};
