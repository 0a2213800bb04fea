//! # Alipay Hex
//!
//! Application service layer and HTTP adapters for the Alipay gateway.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates gateway operations)
//! - `inbound/` - HTTP adapter (Axum server: webhook, redirect, checkout)
//! - `outbound/` - Host billing adapter (paid-callback over HTTP)
//!
//! The service is generic over the provider, settings, and billing ports,
//! allowing different adapter implementations to be injected.

pub mod inbound;
pub mod outbound;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::AlipayGateway;
