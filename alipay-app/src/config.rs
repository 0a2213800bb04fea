//! Configuration loading from environment.

use std::env;

/// Deployment configuration.
///
/// Gateway settings (`ALIPAY_*`) are read separately through the settings
/// store on every operation; these values only wire the process itself.
pub struct Config {
    pub port: u16,
    pub public_base_url: String,
    pub base_path: String,
    pub billing_callback_url: String,
    pub billing_callback_secret: String,
    pub invoice_url_template: String,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .map_err(|_| anyhow::anyhow!("PUBLIC_BASE_URL environment variable is required"))?;

        let base_path = env::var("BASE_PATH").unwrap_or_else(|_| ".".to_string());

        let billing_callback_url = env::var("BILLING_CALLBACK_URL").map_err(|_| {
            anyhow::anyhow!("BILLING_CALLBACK_URL environment variable is required")
        })?;

        let billing_callback_secret = env::var("BILLING_CALLBACK_SECRET").map_err(|_| {
            anyhow::anyhow!("BILLING_CALLBACK_SECRET environment variable is required")
        })?;

        let invoice_url_template = env::var("INVOICE_URL_TEMPLATE").map_err(|_| {
            anyhow::anyhow!("INVOICE_URL_TEMPLATE environment variable is required")
        })?;

        let rate_limit_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()?;

        Ok(Self {
            port,
            public_base_url,
            base_path,
            billing_callback_url,
            billing_callback_secret,
            invoice_url_template,
            rate_limit_per_minute,
        })
    }
}
