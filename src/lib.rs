pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod store;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use handlers::AppState;
pub use store::{MemoryStore, StoreError, User, UserStore};
