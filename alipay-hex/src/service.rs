//! Gateway Application Service
//!
//! Orchestrates the gateway operations through the provider, settings, and
//! billing ports. Contains NO wire or crypto logic - pure orchestration.

use alipay_types::{
    Amount, BillingHooks, GATEWAY_NAME, GatewayError, LineItem, NotifyParams, OrderId,
    PagePayRequest, PayOutcome, ProviderClient, ProviderError, SettingsStore, SiteContext,
    TradeStatus, WebhookAck, order_description,
};

/// Application service for the Alipay gateway.
///
/// Generic over the three ports - adapters are injected at compile time.
/// Provider configuration is rebuilt from settings inside the provider on
/// every call, so the service itself carries no payment state at all.
pub struct AlipayGateway<P, S, B>
where
    P: ProviderClient,
    S: SettingsStore,
    B: BillingHooks,
{
    provider: P,
    settings: S,
    billing: B,
    site: SiteContext,
}

impl<P, S, B> AlipayGateway<P, S, B>
where
    P: ProviderClient,
    S: SettingsStore,
    B: BillingHooks,
{
    pub fn new(provider: P, settings: S, billing: B, site: SiteContext) -> Self {
        Self {
            provider,
            settings,
            billing,
            site,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment initiation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Starts a hosted-checkout payment for an order.
    ///
    /// Orders that already read as paid short-circuit to the invoice view;
    /// otherwise the provider's checkout form is returned for the buyer's
    /// browser. A provider rejection surfaces as [`GatewayError::CheckoutFailed`]
    /// carrying the provider's message and sub-message.
    pub async fn pay(
        &self,
        total: Amount,
        products: &[LineItem],
        order_id: &OrderId,
    ) -> Result<PayOutcome, GatewayError> {
        if self.is_paid(order_id).await {
            return Ok(PayOutcome::AlreadyPaid {
                invoice_url: self.billing.invoice_url(order_id),
            });
        }

        let request = PagePayRequest {
            subject: order_description(products),
            order_id: order_id.clone(),
            total,
            return_url: self.site.url("/alipay/redirect"),
        };

        match self.provider.create_page_payment(&request).await {
            Ok(page) => Ok(PayOutcome::Checkout { html: page.html }),
            Err(ProviderError::Gateway { msg, sub_msg, .. }) => {
                Err(GatewayError::CheckoutFailed {
                    msg,
                    sub_msg: sub_msg.unwrap_or_default(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Status polling
    // ─────────────────────────────────────────────────────────────────────────────

    /// Queries the provider for the order's trade status.
    ///
    /// A paid status marks the order in the host billing system before
    /// reporting `true`. Query failures read as unpaid; nothing is retried.
    pub async fn is_paid(&self, order_id: &OrderId) -> bool {
        match self.provider.query_trade(order_id).await {
            Ok(status) if status.is_paid() => {
                if let Err(e) = self.billing.payment_done(order_id, GATEWAY_NAME).await {
                    tracing::error!(%order_id, error = %e, "paid order could not be marked in billing");
                }
                true
            }
            Ok(status) => {
                tracing::debug!(%order_id, %status, "order not paid");
                false
            }
            Err(e) => {
                tracing::warn!(%order_id, error = %e, "status query failed, treating as unpaid");
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Inbound notifications
    // ─────────────────────────────────────────────────────────────────────────────

    /// Handles an asynchronous provider notification.
    ///
    /// Replies `failure` when the signature does not verify or the app id
    /// does not match; otherwise `success` acknowledges receipt regardless
    /// of trade status, marking the order paid when the status says so.
    pub async fn webhook(&self, params: &NotifyParams) -> WebhookAck {
        match self.notification_authentic(params).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("rejected notification: bad signature or app id");
                return WebhookAck::Failure;
            }
            Err(e) => {
                tracing::error!(error = %e, "could not verify notification");
                return WebhookAck::Failure;
            }
        }

        let status = params
            .get("trade_status")
            .map(|s| TradeStatus::from(s.as_str()))
            .unwrap_or(TradeStatus::Unknown);

        if status.is_paid() {
            match params.get("out_trade_no").map(OrderId::new) {
                Some(Ok(order_id)) => {
                    if let Err(e) = self.billing.payment_done(&order_id, GATEWAY_NAME).await {
                        tracing::error!(%order_id, error = %e, "paid notification could not be marked in billing");
                    }
                }
                _ => tracing::warn!("paid notification without usable out_trade_no"),
            }
        }

        WebhookAck::Success
    }

    /// Handles the buyer's browser returning from the checkout page.
    ///
    /// Raises [`GatewayError::InvalidRequest`] under exactly the conditions
    /// that make [`Self::webhook`] reply `failure`; otherwise re-checks the
    /// paid status and hands back the invoice-view URL to redirect to.
    pub async fn redirect(&self, params: &NotifyParams) -> Result<String, GatewayError> {
        if !self.notification_authentic(params).await? {
            return Err(GatewayError::InvalidRequest);
        }

        let order_id = params
            .get("out_trade_no")
            .ok_or(GatewayError::InvalidRequest)?;
        let order_id = OrderId::new(order_id).map_err(|_| GatewayError::InvalidRequest)?;

        self.is_paid(&order_id).await;
        Ok(self.billing.invoice_url(&order_id))
    }

    /// Signature check plus app-id match, shared by webhook and redirect.
    async fn notification_authentic(
        &self,
        params: &NotifyParams,
    ) -> Result<bool, ProviderError> {
        if !self.provider.verify_notification(params).await? {
            return Ok(false);
        }
        match (
            params.get("app_id"),
            self.settings.get(GATEWAY_NAME, "app_id"),
        ) {
            (Some(notified), Some(configured)) => Ok(*notified == configured),
            _ => Ok(false),
        }
    }
}
