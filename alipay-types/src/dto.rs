//! Data Transfer Objects (DTOs) for requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, LineItem, OrderId};

/// Raw key/value parameters of an inbound provider notification or browser
/// return. Kept sorted so signature checks can walk them in order.
pub type NotifyParams = BTreeMap<String, String>;

// ─────────────────────────────────────────────────────────────────────────────
// Checkout DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Host request to start a hosted-checkout payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Order being paid
    pub order_id: OrderId,
    /// Total in minor units (fen)
    pub total: Amount,
    /// Invoice lines, used to build the checkout description
    #[serde(default)]
    pub products: Vec<LineItem>,
}

/// Hosted-checkout call handed to the provider client.
#[derive(Debug, Clone)]
pub struct PagePayRequest {
    /// Human-readable order description
    pub subject: String,
    pub order_id: OrderId,
    pub total: Amount,
    /// Where the provider sends the buyer's browser afterwards
    pub return_url: String,
}

/// The provider's hosted-checkout response: an auto-submitting HTML form.
#[derive(Debug, Clone)]
pub struct CheckoutPage {
    pub html: String,
}

/// Result of starting a payment.
#[derive(Debug, Clone)]
pub enum PayOutcome {
    /// The order was already paid; send the buyer to the invoice view.
    AlreadyPaid { invoice_url: String },
    /// Checkout page to render in the buyer's browser.
    Checkout { html: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhook DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Plaintext acknowledgement expected by the provider's notification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookAck {
    Success,
    Failure,
}

impl WebhookAck {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookAck::Success => "success",
            WebhookAck::Failure => "failure",
        }
    }
}

impl std::fmt::Display for WebhookAck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
