//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod auth;
mod handlers;
mod server;

pub use auth::AuthenticatedUser;
pub use server::HttpServer;
