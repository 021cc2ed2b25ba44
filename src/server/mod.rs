//! # Web Server
//!
//! - [`server`]: [`ServerCore`], runs uploads through the codec
//! - [`routes`]: axum router and handlers
//! - [`upload`]: staged temporary files and filename checks
//! - [`config`] / [`error`]: configuration and API errors

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod upload;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::ServerCore;
pub use upload::UploadStore;
