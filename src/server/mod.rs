//! HTTP API for gem price quotes
//!
//! Serves the form page, the prediction endpoint and a status probe.

pub mod handlers;
pub mod routing;
pub mod server;
pub mod types;

pub use routing::create_router;
pub use server::start_server;
