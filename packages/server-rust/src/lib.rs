//! HBnB server: axum REST API over a layered in-memory record store with
//! optional JSON-file persistence.

pub mod config;
pub mod logging;
pub mod network;
pub mod storage;

pub use network::{build_router, AppState, NetworkModule};
pub use storage::Catalog;
