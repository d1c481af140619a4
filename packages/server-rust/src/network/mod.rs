//! HTTP surface: configuration, middleware, handlers, and serve lifecycle.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod module;

pub use config::*;
pub use error::ApiError;
pub use extract::JsonBody;
pub use handlers::AppState;
pub use lifecycle::*;
pub use module::{build_router, NetworkModule, API_PREFIX};
