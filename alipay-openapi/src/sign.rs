//! RSA2 (SHA256-with-RSA) parameter signing and verification.

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use alipay_types::{NotifyParams, ProviderError};

/// Content covered by a request signature: every non-empty parameter except
/// `sign` itself, as sorted `k=v` pairs joined by `&`.
pub(crate) fn request_content(params: &BTreeMap<String, String>) -> String {
    content(params, &["sign"], true)
}

/// Content covered by a notification signature: everything except `sign`
/// and `sign_type`, empty values included.
pub(crate) fn notify_content(params: &NotifyParams) -> String {
    content(params, &["sign", "sign_type"], false)
}

fn content(params: &BTreeMap<String, String>, excluded: &[&str], skip_empty: bool) -> String {
    params
        .iter()
        .filter(|(k, v)| !excluded.contains(&k.as_str()) && !(skip_empty && v.is_empty()))
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Signs content with the merchant private key, returning base64.
pub(crate) fn sign(content: &str, key: &RsaPrivateKey) -> Result<String, ProviderError> {
    let signing_key = SigningKey::<Sha256>::new(key.clone());
    let signature = signing_key
        .try_sign(content.as_bytes())
        .map_err(|e| ProviderError::InvalidKey(format!("signing failed: {e}")))?;
    Ok(BASE64.encode(signature.to_bytes()))
}

/// Verifies a base64 signature over content against the provider public key.
pub(crate) fn verify(content: &str, signature_b64: &str, key: &RsaPublicKey) -> bool {
    let Ok(raw) = BASE64.decode(signature_b64.as_bytes()) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(raw.as_slice()) else {
        return false;
    };
    VerifyingKey::<Sha256>::new(key.clone())
        .verify(content.as_bytes(), &signature)
        .is_ok()
}
