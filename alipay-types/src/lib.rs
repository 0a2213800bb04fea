//! # Alipay Types
//!
//! Domain types and port traits for the Alipay hosted-checkout gateway.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (OrderId, Amount, LineItem, TradeStatus)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `schema/` - Settings fields exposed to the host's configuration UI
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod schema;
pub mod site;

/// Gateway name used for settings lookups and billing callbacks.
pub const GATEWAY_NAME: &str = "AliPay";

// Re-export commonly used types
pub use domain::{Amount, LineItem, OrderId, TradeStatus, order_description};
pub use dto::*;
pub use error::{AppError, DomainError, GatewayError, ProviderError};
pub use ports::{BillingHooks, EnvSettings, MapSettings, ProviderClient, SettingsStore};
pub use schema::{ConfigField, FieldType, GatewayMetadata, config_schema, metadata};
pub use site::SiteContext;
