//! Invoice line items and the checkout description they produce.

use serde::{Deserialize, Serialize};

/// A single line of the order being paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name as shown on the invoice
    pub name: String,
    /// Number of units purchased
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Builds the human-readable order description shown on the checkout page.
///
/// Names are concatenated as-is; a ` x{quantity}` suffix (followed by a
/// `, ` separator) is appended only when the quantity is above one. The
/// trailing separator is trimmed.
pub fn order_description(items: &[LineItem]) -> String {
    let mut description = String::new();
    for item in items {
        description.push_str(&item.name);
        if item.quantity > 1 {
            description.push_str(&format!(" x{}, ", item.quantity));
        }
    }
    description.trim_end_matches(", ").to_string()
}
