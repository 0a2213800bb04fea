//! AlipayGateway unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use alipay_types::{
        Amount, BillingHooks, CheckoutPage, GATEWAY_NAME, GatewayError, LineItem, MapSettings,
        NotifyParams, OrderId, PagePayRequest, PayOutcome, ProviderClient, ProviderError,
        SiteContext, TradeStatus, WebhookAck,
    };

    use crate::AlipayGateway;

    const APP_ID: &str = "2021000000000001";

    /// Scripted provider double for the service layer.
    pub struct MockProvider {
        pub verify: Result<bool, ()>,
        pub status: Result<TradeStatus, ()>,
        pub reject_checkout: bool,
    }

    impl Default for MockProvider {
        fn default() -> Self {
            Self {
                verify: Ok(true),
                status: Ok(TradeStatus::WaitBuyerPay),
                reject_checkout: false,
            }
        }
    }

    #[async_trait]
    impl ProviderClient for MockProvider {
        async fn create_page_payment(
            &self,
            req: &PagePayRequest,
        ) -> Result<CheckoutPage, ProviderError> {
            if self.reject_checkout {
                return Err(ProviderError::Gateway {
                    code: "40004".into(),
                    msg: "Business Failed".into(),
                    sub_code: Some("ACQ.TRADE_HAS_CLOSE".into()),
                    sub_msg: Some("trade already closed".into()),
                });
            }
            Ok(CheckoutPage {
                html: format!("<form>{}:{}</form>", req.order_id, req.subject),
            })
        }

        async fn query_trade(&self, _order_id: &OrderId) -> Result<TradeStatus, ProviderError> {
            self.status.map_err(|_| ProviderError::Transport("connection refused".into()))
        }

        async fn verify_notification(
            &self,
            _params: &NotifyParams,
        ) -> Result<bool, ProviderError> {
            self.verify
                .map_err(|_| ProviderError::MissingSetting("alipay_public_key"))
        }
    }

    /// Billing double that records paid-callback invocations.
    #[derive(Clone, Default)]
    pub struct MockBilling {
        pub calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl MockBilling {
        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BillingHooks for MockBilling {
        async fn payment_done(
            &self,
            order_id: &OrderId,
            gateway: &str,
        ) -> Result<(), GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((order_id.to_string(), gateway.to_string()));
            Ok(())
        }

        fn invoice_url(&self, order_id: &OrderId) -> String {
            format!("https://billing.example.com/invoice/{order_id}")
        }
    }

    fn gateway(
        provider: MockProvider,
    ) -> (
        AlipayGateway<MockProvider, MapSettings, MockBilling>,
        MockBilling,
    ) {
        let settings = MapSettings::new().with(GATEWAY_NAME, "app_id", APP_ID);
        let billing = MockBilling::default();
        let site = SiteContext::new("https://billing.example.com", "/srv/billing");
        (
            AlipayGateway::new(provider, settings, billing.clone(), site),
            billing,
        )
    }

    fn notification(app_id: &str, status: &str) -> NotifyParams {
        let mut params = NotifyParams::new();
        params.insert("app_id".into(), app_id.into());
        params.insert("out_trade_no".into(), "INV-1042".into());
        params.insert("trade_status".into(), status.into());
        params.insert("sign".into(), "ZmFrZQ==".into());
        params.insert("sign_type".into(), "RSA2".into());
        params
    }

    fn order() -> OrderId {
        "INV-1042".parse().unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Webhook
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_webhook_paid_acknowledges_and_marks_order() {
        let (gateway, billing) = gateway(MockProvider::default());

        let ack = gateway.webhook(&notification(APP_ID, "TRADE_SUCCESS")).await;

        assert_eq!(ack, WebhookAck::Success);
        assert_eq!(
            billing.calls.lock().unwrap().as_slice(),
            &[("INV-1042".to_string(), "AliPay".to_string())]
        );
    }

    #[tokio::test]
    async fn test_webhook_finished_status_also_marks_order() {
        let (gateway, billing) = gateway(MockProvider::default());

        let ack = gateway
            .webhook(&notification(APP_ID, "TRADE_FINISHED"))
            .await;

        assert_eq!(ack, WebhookAck::Success);
        assert_eq!(billing.call_count(), 1);
    }

    #[tokio::test]
    async fn test_webhook_unpaid_status_acknowledges_without_marking() {
        let (gateway, billing) = gateway(MockProvider::default());

        let ack = gateway
            .webhook(&notification(APP_ID, "WAIT_BUYER_PAY"))
            .await;

        assert_eq!(ack, WebhookAck::Success);
        assert_eq!(billing.call_count(), 0);
    }

    #[tokio::test]
    async fn test_webhook_bad_signature_rejected_without_marking() {
        let (gateway, billing) = gateway(MockProvider {
            verify: Ok(false),
            ..MockProvider::default()
        });

        let ack = gateway.webhook(&notification(APP_ID, "TRADE_SUCCESS")).await;

        assert_eq!(ack, WebhookAck::Failure);
        assert_eq!(billing.call_count(), 0);
    }

    #[tokio::test]
    async fn test_webhook_app_id_mismatch_rejected_without_marking() {
        let (gateway, billing) = gateway(MockProvider::default());

        let ack = gateway
            .webhook(&notification("2088999999999999", "TRADE_SUCCESS"))
            .await;

        assert_eq!(ack, WebhookAck::Failure);
        assert_eq!(billing.call_count(), 0);
    }

    #[tokio::test]
    async fn test_webhook_verification_error_rejected() {
        let (gateway, billing) = gateway(MockProvider {
            verify: Err(()),
            ..MockProvider::default()
        });

        let ack = gateway.webhook(&notification(APP_ID, "TRADE_SUCCESS")).await;

        assert_eq!(ack, WebhookAck::Failure);
        assert_eq!(billing.call_count(), 0);
    }

    #[tokio::test]
    async fn test_webhook_paid_without_order_still_acknowledges() {
        let (gateway, billing) = gateway(MockProvider::default());

        let mut params = notification(APP_ID, "TRADE_SUCCESS");
        params.remove("out_trade_no");
        let ack = gateway.webhook(&params).await;

        assert_eq!(ack, WebhookAck::Success);
        assert_eq!(billing.call_count(), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Redirect
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_redirect_valid_lands_on_invoice() {
        let (gateway, billing) = gateway(MockProvider {
            status: Ok(TradeStatus::TradeSuccess),
            ..MockProvider::default()
        });

        let url = gateway
            .redirect(&notification(APP_ID, "TRADE_SUCCESS"))
            .await
            .unwrap();

        assert_eq!(url, "https://billing.example.com/invoice/INV-1042");
        // the redirect path re-runs the paid check, which marks the order
        assert_eq!(billing.call_count(), 1);
    }

    #[tokio::test]
    async fn test_redirect_unpaid_still_lands_on_invoice() {
        let (gateway, billing) = gateway(MockProvider::default());

        let url = gateway
            .redirect(&notification(APP_ID, "WAIT_BUYER_PAY"))
            .await
            .unwrap();

        assert_eq!(url, "https://billing.example.com/invoice/INV-1042");
        assert_eq!(billing.call_count(), 0);
    }

    #[tokio::test]
    async fn test_redirect_bad_signature_raises() {
        let (gateway, _) = gateway(MockProvider {
            verify: Ok(false),
            ..MockProvider::default()
        });

        let result = gateway.redirect(&notification(APP_ID, "TRADE_SUCCESS")).await;

        assert!(matches!(result, Err(GatewayError::InvalidRequest)));
    }

    #[tokio::test]
    async fn test_redirect_app_id_mismatch_raises() {
        let (gateway, _) = gateway(MockProvider::default());

        let result = gateway
            .redirect(&notification("2088999999999999", "TRADE_SUCCESS"))
            .await;

        assert!(matches!(result, Err(GatewayError::InvalidRequest)));
    }

    #[tokio::test]
    async fn test_redirect_missing_order_raises() {
        let (gateway, _) = gateway(MockProvider::default());

        let mut params = notification(APP_ID, "TRADE_SUCCESS");
        params.remove("out_trade_no");

        let result = gateway.redirect(&params).await;

        assert!(matches!(result, Err(GatewayError::InvalidRequest)));
    }

    #[tokio::test]
    async fn test_redirect_verification_error_propagates() {
        let (gateway, _) = gateway(MockProvider {
            verify: Err(()),
            ..MockProvider::default()
        });

        let result = gateway.redirect(&notification(APP_ID, "TRADE_SUCCESS")).await;

        assert!(matches!(result, Err(GatewayError::Provider(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Status polling
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_is_paid_marks_order_once() {
        let (gateway, billing) = gateway(MockProvider {
            status: Ok(TradeStatus::TradeSuccess),
            ..MockProvider::default()
        });

        assert!(gateway.is_paid(&order()).await);
        assert_eq!(billing.call_count(), 1);
    }

    #[tokio::test]
    async fn test_is_paid_finished_counts_as_paid() {
        let (gateway, billing) = gateway(MockProvider {
            status: Ok(TradeStatus::TradeFinished),
            ..MockProvider::default()
        });

        assert!(gateway.is_paid(&order()).await);
        assert_eq!(billing.call_count(), 1);
    }

    #[tokio::test]
    async fn test_is_paid_unpaid_has_no_side_effects() {
        let (gateway, billing) = gateway(MockProvider::default());

        assert!(!gateway.is_paid(&order()).await);
        assert_eq!(billing.call_count(), 0);
    }

    #[tokio::test]
    async fn test_is_paid_query_failure_reads_as_unpaid() {
        let (gateway, billing) = gateway(MockProvider {
            status: Err(()),
            ..MockProvider::default()
        });

        assert!(!gateway.is_paid(&order()).await);
        assert_eq!(billing.call_count(), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment initiation
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_pay_short_circuits_when_already_paid() {
        let (gateway, billing) = gateway(MockProvider {
            status: Ok(TradeStatus::TradeSuccess),
            ..MockProvider::default()
        });

        let outcome = gateway
            .pay(Amount::from_minor(12550).unwrap(), &[], &order())
            .await
            .unwrap();

        match outcome {
            PayOutcome::AlreadyPaid { invoice_url } => {
                assert_eq!(invoice_url, "https://billing.example.com/invoice/INV-1042");
            }
            other => panic!("expected invoice redirect, got {other:?}"),
        }
        assert_eq!(billing.call_count(), 1);
    }

    #[tokio::test]
    async fn test_pay_returns_checkout_page() {
        let (gateway, _) = gateway(MockProvider::default());

        let products = vec![LineItem::new("Hosting", 1), LineItem::new("Backups", 3)];
        let outcome = gateway
            .pay(Amount::from_minor(9900).unwrap(), &products, &order())
            .await
            .unwrap();

        match outcome {
            PayOutcome::Checkout { html } => {
                // subject is the line-item description
                assert!(html.contains("INV-1042:Hosting"));
                assert!(html.contains("Backups x3"));
            }
            other => panic!("expected checkout page, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pay_rejection_carries_provider_messages() {
        let (gateway, _) = gateway(MockProvider {
            reject_checkout: true,
            ..MockProvider::default()
        });

        let result = gateway
            .pay(Amount::from_minor(9900).unwrap(), &[], &order())
            .await;

        match result {
            Err(GatewayError::CheckoutFailed { msg, sub_msg }) => {
                assert_eq!(msg, "Business Failed");
                assert_eq!(sub_msg, "trade already closed");
            }
            other => panic!("expected checkout failure, got {other:?}"),
        }
    }
}
