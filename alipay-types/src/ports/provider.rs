//! Provider client port.
//!
//! This is the seam where the vendor's payment API lives. The application
//! layer only ever sees these three calls; request signing, notification
//! verification, and the wire protocol are adapter concerns.

use crate::domain::{OrderId, TradeStatus};
use crate::dto::{CheckoutPage, NotifyParams, PagePayRequest};
use crate::error::ProviderError;

/// Outbound port for the payment provider.
///
/// Implementations rebuild their configuration from stored settings on every
/// call; nothing is cached between operations.
#[async_trait::async_trait]
pub trait ProviderClient: Send + Sync + 'static {
    /// Creates a hosted-checkout page for the given order.
    async fn create_page_payment(
        &self,
        req: &PagePayRequest,
    ) -> Result<CheckoutPage, ProviderError>;

    /// Queries the provider for the current trade status of an order.
    async fn query_trade(&self, order_id: &OrderId) -> Result<TradeStatus, ProviderError>;

    /// Checks the authenticity of an inbound notification.
    ///
    /// `Ok(false)` means the signature did not verify; errors are reserved
    /// for configuration or key-material problems.
    async fn verify_notification(&self, params: &NotifyParams) -> Result<bool, ProviderError>;
}
