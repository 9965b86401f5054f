pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use router::create_router;
pub use server::{launch, shutdown_signal, RunningRapp};
pub use state::AppState;
