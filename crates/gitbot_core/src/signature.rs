//! Webhook signature verification.
//!
//! GitHub signs every delivery with the webhook secret. The HMAC-SHA256
//! digest is sent in `X-Hub-Signature-256` as `sha256=<hex>`, and the legacy
//! HMAC-SHA1 digest in `X-Hub-Signature` as `sha1=<hex>`. The SHA-256 header
//! is preferred when both are present.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use thiserror::Error;

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;

/// Digest used to sign a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    Sha256,
    Sha1,
}

impl SignatureAlgorithm {
    /// The `<prefix>=` that precedes the hex digest in the header.
    pub fn prefix(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha256 => "sha256",
            SignatureAlgorithm::Sha1 => "sha1",
        }
    }
}

/// Why a delivery failed authentication.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Signature header is missing")]
    Missing,

    #[error("Signature header is malformed: {0}")]
    Malformed(String),

    #[error("Signature does not match the payload")]
    Mismatch,
}

/// Checks the signature headers of a delivery against `body`.
///
/// Returns the algorithm that was verified.
///
/// # Errors
///
/// `SignatureError::Missing` when neither header is present,
/// `SignatureError::Malformed` when the header is not `<algorithm>=<hex>` and
/// `SignatureError::Mismatch` when the digest is wrong.
pub fn verify_delivery(
    body: &[u8],
    sha256_header: Option<&str>,
    sha1_header: Option<&str>,
    secret: &[u8],
) -> Result<SignatureAlgorithm, SignatureError> {
    match (sha256_header, sha1_header) {
        (Some(header), _) => {
            verify_signature(body, header, SignatureAlgorithm::Sha256, secret)?;
            Ok(SignatureAlgorithm::Sha256)
        }
        (None, Some(header)) => {
            verify_signature(body, header, SignatureAlgorithm::Sha1, secret)?;
            Ok(SignatureAlgorithm::Sha1)
        }
        (None, None) => Err(SignatureError::Missing),
    }
}

/// Verifies a single `<algorithm>=<hex>` header value.
///
/// The digest comparison is constant-time.
pub fn verify_signature(
    body: &[u8],
    header: &str,
    algorithm: SignatureAlgorithm,
    secret: &[u8],
) -> Result<(), SignatureError> {
    let (prefix, hex_part) = header
        .trim()
        .split_once('=')
        .ok_or_else(|| SignatureError::Malformed("expected '<algorithm>=<hex digest>'".to_string()))?;

    if prefix != algorithm.prefix() {
        return Err(SignatureError::Malformed(format!(
            "expected '{}' signature, got '{}'",
            algorithm.prefix(),
            prefix
        )));
    }

    let received = hex::decode(hex_part)
        .map_err(|e| SignatureError::Malformed(format!("invalid hex digest: {}", e)))?;

    let verified = match algorithm {
        SignatureAlgorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(secret)
                .map_err(|e| SignatureError::Malformed(e.to_string()))?;
            mac.update(body);
            mac.verify_slice(&received).is_ok()
        }
        SignatureAlgorithm::Sha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(secret)
                .map_err(|e| SignatureError::Malformed(e.to_string()))?;
            mac.update(body);
            mac.verify_slice(&received).is_ok()
        }
    };

    if verified {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Computes the header value GitHub would send for `body`.
///
/// # Examples
///
/// ```
/// use gitbot_core::signature::{sign, verify_delivery, SignatureAlgorithm};
///
/// let header = sign(b"{}", b"secret", SignatureAlgorithm::Sha256);
/// assert!(header.starts_with("sha256="));
/// assert!(verify_delivery(b"{}", Some(&header), None, b"secret").is_ok());
/// ```
pub fn sign(body: &[u8], secret: &[u8], algorithm: SignatureAlgorithm) -> String {
    // HMAC keys of any length are valid, so construction cannot fail.
    let digest = match algorithm {
        SignatureAlgorithm::Sha256 => Hmac::<Sha256>::new_from_slice(secret)
            .map(|mut mac| {
                mac.update(body);
                mac.finalize().into_bytes().to_vec()
            })
            .unwrap_or_default(),
        SignatureAlgorithm::Sha1 => Hmac::<Sha1>::new_from_slice(secret)
            .map(|mut mac| {
                mac.update(body);
                mac.finalize().into_bytes().to_vec()
            })
            .unwrap_or_default(),
    };

    format!("{}={}", algorithm.prefix(), hex::encode(digest))
}
