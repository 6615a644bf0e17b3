//! HTTP surface for the tracker core.

pub mod handlers;
pub mod router;
pub mod types;

pub use handlers::AppState;
pub use router::{ServerConfig, create_router, serve};
