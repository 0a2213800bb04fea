//! Host billing adapter: the paid-callback over HTTP.
//!
//! The host billing application exposes an endpoint that marks an order as
//! paid. Calls are signed with HMAC-SHA256 over the JSON body so the host
//! can authenticate them; the matching verify helper is what the host side
//! uses.

use async_trait::async_trait;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use alipay_types::{BillingHooks, GatewayError, OrderId};

const SIGNATURE_HEADER: &str = "x-billing-signature";

/// Billing hooks backed by the host application's HTTP callback endpoint.
pub struct HttpBillingHooks {
    client: reqwest::Client,
    endpoint: String,
    secret: String,
    invoice_url_template: String,
}

impl HttpBillingHooks {
    /// # Arguments
    /// * `endpoint` - host URL that marks payments done
    /// * `secret` - shared HMAC secret for callback signing
    /// * `invoice_url_template` - invoice view URL with an `{order}` placeholder
    pub fn new(
        endpoint: impl Into<String>,
        secret: impl Into<String>,
        invoice_url_template: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client with default TLS");
        Self {
            client,
            endpoint: endpoint.into(),
            secret: secret.into(),
            invoice_url_template: invoice_url_template.into(),
        }
    }
}

#[async_trait]
impl BillingHooks for HttpBillingHooks {
    #[tracing::instrument(skip(self), fields(order_id = %order_id))]
    async fn payment_done(&self, order_id: &OrderId, gateway: &str) -> Result<(), GatewayError> {
        let body = serde_json::json!({
            "order_id": order_id.as_str(),
            "gateway": gateway,
        })
        .to_string();
        let signature = sign_callback(body.as_bytes(), &self.secret);

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| GatewayError::Billing(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Billing(format!(
                "HTTP {}",
                response.status()
            )));
        }

        tracing::info!("order marked paid in billing");
        Ok(())
    }

    fn invoice_url(&self, order_id: &OrderId) -> String {
        self.invoice_url_template
            .replace("{order}", order_id.as_str())
    }
}

/// Signs a callback payload using HMAC-SHA256.
pub fn sign_callback(payload: &[u8], secret: &str) -> String {
    use hmac::{Hmac, Mac};

    type HmacSha256 = Hmac<Sha256>;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a callback signature using constant-time comparison.
pub fn verify_callback_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    let expected = sign_callback(payload, secret);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}
