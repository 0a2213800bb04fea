//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server exposing the gateway's provider-facing routes.

mod handlers;
mod rate_limit;
mod server;

pub use server::HttpServer;
