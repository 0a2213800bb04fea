//! OpenAPI gateway client.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{FixedOffset, Utc};

use alipay_types::{
    CheckoutPage, NotifyParams, OrderId, PagePayRequest, ProviderClient, ProviderError,
    SettingsStore, SiteContext, TradeStatus,
};

use crate::config::ProviderConfig;
use crate::sign;

const CHARSET: &str = "utf-8";
const VERSION: &str = "1.0";
const SIGN_TYPE: &str = "RSA2";
const PAGE_PAY_METHOD: &str = "alipay.trade.page.pay";
const QUERY_METHOD: &str = "alipay.trade.query";
const PAGE_PAY_PRODUCT_CODE: &str = "FAST_INSTANT_TRADE_PAY";

/// Gateway timestamps are expressed in the provider's local time (UTC+8).
const GATEWAY_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Provider client for the Alipay OpenAPI gateway.
///
/// Holds the settings store, not a configuration: the configuration is
/// rebuilt on every call so setting changes take effect immediately.
pub struct OpenApiClient<S: SettingsStore> {
    settings: S,
    site: SiteContext,
    http: reqwest::Client,
}

impl<S: SettingsStore> OpenApiClient<S> {
    pub fn new(settings: S, site: SiteContext) -> Self {
        // The host framework imposes no deadline on provider calls, so the
        // client carries its own.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client with default TLS");
        Self {
            settings,
            site,
            http,
        }
    }

    fn config(&self) -> Result<ProviderConfig, ProviderError> {
        ProviderConfig::from_settings(&self.settings, &self.site)
    }

    /// Common request parameters plus `biz_content`, signed.
    fn signed_params(
        config: &ProviderConfig,
        method: &str,
        biz_content: String,
        extra: &[(&str, &str)],
    ) -> Result<BTreeMap<String, String>, ProviderError> {
        let mut params = BTreeMap::new();
        params.insert("app_id".to_string(), config.app_id.clone());
        params.insert("method".to_string(), method.to_string());
        params.insert("format".to_string(), "JSON".to_string());
        params.insert("charset".to_string(), CHARSET.to_string());
        params.insert("sign_type".to_string(), SIGN_TYPE.to_string());
        params.insert("timestamp".to_string(), gateway_timestamp());
        params.insert("version".to_string(), VERSION.to_string());
        params.insert("biz_content".to_string(), biz_content);
        for (key, value) in extra {
            params.insert(key.to_string(), value.to_string());
        }
        if let Some(cert) = config.cert_params()? {
            params.insert("app_cert_sn".to_string(), cert.app_cert_sn);
            params.insert("alipay_root_cert_sn".to_string(), cert.alipay_root_cert_sn);
        }

        let signature = sign::sign(&sign::request_content(&params), &config.signing_key()?)?;
        params.insert("sign".to_string(), signature);
        Ok(params)
    }
}

#[async_trait::async_trait]
impl<S: SettingsStore> ProviderClient for OpenApiClient<S> {
    async fn create_page_payment(
        &self,
        req: &PagePayRequest,
    ) -> Result<CheckoutPage, ProviderError> {
        let config = self.config()?;

        let biz_content = serde_json::json!({
            "out_trade_no": req.order_id.as_str(),
            "product_code": PAGE_PAY_PRODUCT_CODE,
            "total_amount": req.total.to_major_string(),
            "subject": req.subject,
        })
        .to_string();

        let params = Self::signed_params(
            &config,
            PAGE_PAY_METHOD,
            biz_content,
            &[
                ("notify_url", config.notify_url.as_str()),
                ("return_url", req.return_url.as_str()),
            ],
        )?;

        tracing::debug!(order_id = %req.order_id, "built hosted-checkout form");
        Ok(CheckoutPage {
            html: render_form(&config.gateway_url, &params),
        })
    }

    async fn query_trade(&self, order_id: &OrderId) -> Result<TradeStatus, ProviderError> {
        let config = self.config()?;

        let biz_content =
            serde_json::json!({ "out_trade_no": order_id.as_str() }).to_string();
        let params = Self::signed_params(&config, QUERY_METHOD, biz_content, &[])?;

        let response = self
            .http
            .post(&config.gateway_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let payload = body
            .get("alipay_trade_query_response")
            .ok_or_else(|| ProviderError::Malformed("missing query response envelope".into()))?;

        let text = |field: &str| {
            payload
                .get(field)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        let code = text("code").unwrap_or_default();
        if code != "10000" {
            return Err(ProviderError::Gateway {
                code,
                msg: text("msg").unwrap_or_default(),
                sub_code: text("sub_code"),
                sub_msg: text("sub_msg"),
            });
        }

        Ok(text("trade_status")
            .as_deref()
            .map(TradeStatus::from)
            .unwrap_or(TradeStatus::Unknown))
    }

    async fn verify_notification(&self, params: &NotifyParams) -> Result<bool, ProviderError> {
        let config = self.config()?;
        let Some(signature) = params.get("sign") else {
            return Ok(false);
        };
        let key = config.verifying_key()?;
        Ok(sign::verify(&sign::notify_content(params), signature, &key))
    }
}

fn gateway_timestamp() -> String {
    let offset = FixedOffset::east_opt(GATEWAY_UTC_OFFSET_SECS).unwrap();
    Utc::now()
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Auto-submitting POST form carrying the signed parameters to the gateway.
fn render_form(gateway_url: &str, params: &BTreeMap<String, String>) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<form id=\"alipay_submit\" name=\"alipay_submit\" action=\"{}?charset={}\" method=\"POST\">\n",
        escape(gateway_url),
        CHARSET
    ));
    for (name, value) in params {
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\"/>\n",
            escape(name),
            escape(value)
        ));
    }
    html.push_str("</form>\n<script>document.forms[\"alipay_submit\"].submit();</script>");
    html
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
