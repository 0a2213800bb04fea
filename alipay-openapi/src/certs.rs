//! Certificate-mode material: public key extraction and serial digests.
//!
//! In cert mode the gateway wants two extra request parameters derived from
//! the merchant and root certificates: an md5 digest of each certificate's
//! issuer (RFC 2253 order, short attribute names) concatenated with its
//! decimal serial. The root file may hold a chain; only RSA-signed entries
//! contribute, joined by `_`.

use std::path::Path;

use rsa::RsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use x509_parser::pem::Pem;
use x509_parser::prelude::*;

use alipay_types::ProviderError;

#[derive(Debug, Clone)]
pub(crate) struct CertParams {
    pub app_cert_sn: String,
    pub alipay_root_cert_sn: String,
}

/// Reads the provider certificate and extracts its RSA public key.
pub(crate) fn public_key_from_cert(path: &Path) -> Result<RsaPublicKey, ProviderError> {
    let data = read(path)?;
    let pem = first_pem(&data, path)?;
    let cert = parse(&pem, path)?;
    RsaPublicKey::from_public_key_der(cert.public_key().raw)
        .map_err(|e| ProviderError::Certificate(format!("{}: not an RSA key: {e}", path.display())))
}

/// Serial digest of the first certificate in a file.
pub(crate) fn cert_sn_from_file(path: &Path) -> Result<String, ProviderError> {
    let data = read(path)?;
    let pem = first_pem(&data, path)?;
    Ok(cert_sn(&parse(&pem, path)?))
}

/// Joined serial digests of the RSA-signed certificates in the root chain.
pub(crate) fn root_cert_sn_from_file(path: &Path) -> Result<String, ProviderError> {
    let data = read(path)?;
    let mut sns = Vec::new();
    for pem in Pem::iter_from_buffer(&data) {
        let pem = pem
            .map_err(|e| ProviderError::Certificate(format!("{}: {e}", path.display())))?;
        let cert = parse(&pem, path)?;
        if is_rsa_signed(&cert) {
            sns.push(cert_sn(&cert));
        }
    }
    if sns.is_empty() {
        return Err(ProviderError::Certificate(format!(
            "{}: no RSA-signed certificates in root chain",
            path.display()
        )));
    }
    Ok(sns.join("_"))
}

fn read(path: &Path) -> Result<Vec<u8>, ProviderError> {
    std::fs::read(path)
        .map_err(|e| ProviderError::Certificate(format!("{}: {e}", path.display())))
}

fn first_pem(data: &[u8], path: &Path) -> Result<Pem, ProviderError> {
    Pem::iter_from_buffer(data)
        .next()
        .ok_or_else(|| {
            ProviderError::Certificate(format!("{}: no PEM block found", path.display()))
        })?
        .map_err(|e| ProviderError::Certificate(format!("{}: {e}", path.display())))
}

fn parse<'a>(pem: &'a Pem, path: &Path) -> Result<X509Certificate<'a>, ProviderError> {
    pem.parse_x509()
        .map_err(|e| ProviderError::Certificate(format!("{}: {e}", path.display())))
}

fn cert_sn(cert: &X509Certificate<'_>) -> String {
    let serial = cert.tbs_certificate.serial.to_str_radix(10);
    let digest = md5::compute(format!("{}{}", issuer_string(cert), serial));
    format!("{digest:x}")
}

/// Issuer RDNs in RFC 2253 order (reversed) with short attribute names,
/// matching what the gateway digests serials against.
fn issuer_string(cert: &X509Certificate<'_>) -> String {
    let mut parts: Vec<String> = Vec::new();
    for rdn in cert.issuer().iter_rdn() {
        for atv in rdn.iter() {
            let oid = atv.attr_type().to_id_string();
            let name = match oid.as_str() {
                "2.5.4.3" => "CN",
                "2.5.4.6" => "C",
                "2.5.4.7" => "L",
                "2.5.4.8" => "ST",
                "2.5.4.10" => "O",
                "2.5.4.11" => "OU",
                _ => oid.as_str(),
            };
            let value = atv.as_str().unwrap_or_default();
            parts.push(format!("{name}={value}"));
        }
    }
    parts.reverse();
    parts.join(",")
}

fn is_rsa_signed(cert: &X509Certificate<'_>) -> bool {
    // md5/sha1/sha256/sha384/sha512/sha224 WithRSAEncryption
    matches!(
        cert.signature_algorithm.algorithm.to_id_string().as_str(),
        "1.2.840.113549.1.1.4"
            | "1.2.840.113549.1.1.5"
            | "1.2.840.113549.1.1.11"
            | "1.2.840.113549.1.1.12"
            | "1.2.840.113549.1.1.13"
            | "1.2.840.113549.1.1.14"
    )
}
