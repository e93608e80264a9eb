//! SpamGuard Server
//!
//! HTTP front end for the spam classifier. Routing, CORS and request
//! validation live here; classification itself is delegated to
//! `spamguard-classifiers`.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use cli::Cli;
pub use config::{LogFormat, ServerConfig};
pub use routes::{create_router, AppError};
pub use state::AppState;
