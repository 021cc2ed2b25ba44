//! # Common Components
//!
//! Shared utilities used by the server library and the `web_server` binary.
//!
//! ## Modules
//!
//! - [`messages`]: JSON bodies exchanged over the HTTP API
//! - [`config`]: Configuration parsing utilities
//! - [`logging`]: Log output formatting

pub mod config;
pub mod logging;
pub mod messages;
