//! Outbound adapters driven by the application layer.

mod billing;

pub use billing::{HttpBillingHooks, sign_callback, verify_callback_signature};
