//! Provider configuration assembled from stored settings.

use std::path::PathBuf;

use rsa::{RsaPrivateKey, RsaPublicKey};

use alipay_types::{GATEWAY_NAME, ProviderError, SettingsStore, SiteContext};

use crate::certs::{self, CertParams};
use crate::keys;

pub const LIVE_GATEWAY: &str = "https://openapi.alipay.com/gateway.do";
pub const SANDBOX_GATEWAY: &str = "https://openapi-sandbox.dl.alipaydev.com/gateway.do";

/// One operation's view of the stored gateway settings.
///
/// Rebuilt from the settings store on every provider call; nothing here is
/// cached between operations. Key material is parsed lazily so that an
/// operation only fails on the settings it actually needs.
#[derive(Debug)]
pub struct ProviderConfig {
    pub gateway_url: String,
    pub app_id: String,
    pub notify_url: String,
    key_mode: bool,
    private_key: Option<String>,
    alipay_public_key: Option<String>,
    app_cert_path: Option<PathBuf>,
    alipay_cert_path: Option<PathBuf>,
    root_cert_path: Option<PathBuf>,
}

impl ProviderConfig {
    pub fn from_settings(
        settings: &impl SettingsStore,
        site: &SiteContext,
    ) -> Result<Self, ProviderError> {
        let app_id = settings
            .get(GATEWAY_NAME, "app_id")
            .ok_or(ProviderError::MissingSetting("app_id"))?;

        let gateway_url = if settings.get_bool(GATEWAY_NAME, "live") {
            LIVE_GATEWAY
        } else {
            SANDBOX_GATEWAY
        }
        .to_string();

        let cert_path = |field: &str| {
            settings
                .get(GATEWAY_NAME, field)
                .map(|relative| site.path(&relative))
        };

        Ok(Self {
            gateway_url,
            app_id,
            notify_url: site.url("/alipay/webhook"),
            key_mode: settings.get_bool(GATEWAY_NAME, "is_key_mode"),
            private_key: settings.get(GATEWAY_NAME, "private_key"),
            alipay_public_key: settings.get(GATEWAY_NAME, "alipay_public_key"),
            app_cert_path: cert_path("app_cert_public_key"),
            alipay_cert_path: cert_path("alipay_cert_public_key"),
            root_cert_path: cert_path("alipay_root_cert"),
        })
    }

    /// Merchant private key, parsed for this operation.
    pub(crate) fn signing_key(&self) -> Result<RsaPrivateKey, ProviderError> {
        let raw = self
            .private_key
            .as_deref()
            .ok_or(ProviderError::MissingSetting("private_key"))?;
        keys::parse_private_key(raw)
    }

    /// Provider public key: the raw key string in key mode, otherwise
    /// extracted from the provider certificate.
    pub(crate) fn verifying_key(&self) -> Result<RsaPublicKey, ProviderError> {
        if self.key_mode {
            let raw = self
                .alipay_public_key
                .as_deref()
                .ok_or(ProviderError::MissingSetting("alipay_public_key"))?;
            keys::parse_public_key(raw)
        } else {
            let path = self
                .alipay_cert_path
                .as_deref()
                .ok_or(ProviderError::MissingSetting("alipay_cert_public_key"))?;
            certs::public_key_from_cert(path)
        }
    }

    /// Certificate serial parameters sent with cert-mode requests.
    pub(crate) fn cert_params(&self) -> Result<Option<CertParams>, ProviderError> {
        if self.key_mode {
            return Ok(None);
        }
        let app = self
            .app_cert_path
            .as_deref()
            .ok_or(ProviderError::MissingSetting("app_cert_public_key"))?;
        let root = self
            .root_cert_path
            .as_deref()
            .ok_or(ProviderError::MissingSetting("alipay_root_cert"))?;
        Ok(Some(CertParams {
            app_cert_sn: certs::cert_sn_from_file(app)?,
            alipay_root_cert_sn: certs::root_cert_sn_from_file(root)?,
        }))
    }
}
