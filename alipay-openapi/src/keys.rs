//! RSA key material parsing.
//!
//! Merchant dashboards hand out keys in several shapes: PEM with armor,
//! or the bare base64 DER the provider's key tool generates. Both PKCS#8
//! and PKCS#1 encodings are accepted.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use alipay_types::ProviderError;

pub(crate) fn parse_private_key(raw: &str) -> Result<RsaPrivateKey, ProviderError> {
    let der = der_bytes(raw)?;
    RsaPrivateKey::from_pkcs8_der(&der)
        .or_else(|_| RsaPrivateKey::from_pkcs1_der(&der))
        .map_err(|e| ProviderError::InvalidKey(format!("merchant private key: {e}")))
}

pub(crate) fn parse_public_key(raw: &str) -> Result<RsaPublicKey, ProviderError> {
    let der = der_bytes(raw)?;
    RsaPublicKey::from_public_key_der(&der)
        .or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
        .map_err(|e| ProviderError::InvalidKey(format!("provider public key: {e}")))
}

/// Strips PEM armor and whitespace, then base64-decodes.
fn der_bytes(raw: &str) -> Result<Vec<u8>, ProviderError> {
    let body: String = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with("-----"))
        .collect::<Vec<_>>()
        .join("");
    let body: String = body.split_whitespace().collect();
    BASE64
        .decode(body.as_bytes())
        .map_err(|e| ProviderError::InvalidKey(format!("key is not valid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use rand_core::OsRng;
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

    use super::*;

    #[test]
    fn test_parse_pem_and_bare_base64() {
        let key = RsaPrivateKey::new(&mut OsRng, 1024).unwrap();
        let pem = key.to_pkcs8_pem(LineEnding::LF).unwrap();

        // full PEM armor
        assert!(parse_private_key(&pem).is_ok());

        // bare base64 body, as copied out of the provider's key tool
        let bare: String = pem
            .lines()
            .filter(|l| !l.starts_with("-----"))
            .collect();
        assert!(parse_private_key(&bare).is_ok());

        let public_pem = key.to_public_key().to_public_key_pem(LineEnding::LF).unwrap();
        assert!(parse_public_key(&public_pem).is_ok());
    }

    #[test]
    fn test_garbage_key_rejected() {
        assert!(matches!(
            parse_private_key("not a key"),
            Err(ProviderError::InvalidKey(_))
        ));
    }
}
