//! # Alipay OpenAPI
//!
//! Outbound adapter for the Alipay OpenAPI gateway. Implements the
//! `ProviderClient` port: hosted-checkout form creation, synchronous trade
//! queries, and notification signature checks.
//!
//! The RSA2 signature scheme delegates entirely to the `rsa`/`sha2` crates;
//! certificate handling to `x509-parser`. This crate owns only parameter
//! assembly and the gateway's response envelope.

mod certs;
mod client;
mod config;
mod keys;
mod sign;

pub use client::OpenApiClient;
pub use config::{LIVE_GATEWAY, ProviderConfig, SANDBOX_GATEWAY};
