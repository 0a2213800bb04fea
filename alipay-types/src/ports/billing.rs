//! Host billing port.
//!
//! The two collaborators the host application exposes to payment gateways:
//! marking an order as paid, and resolving the invoice-view URL a buyer
//! should land on.

use crate::domain::OrderId;
use crate::error::GatewayError;

/// Port trait for host billing callbacks.
#[async_trait::async_trait]
pub trait BillingHooks: Send + Sync + 'static {
    /// Tells the host billing system that an order has been paid through
    /// the named gateway.
    async fn payment_done(&self, order_id: &OrderId, gateway: &str) -> Result<(), GatewayError>;

    /// Resolves the buyer-facing invoice view for an order.
    fn invoice_url(&self, order_id: &OrderId) -> String;
}
