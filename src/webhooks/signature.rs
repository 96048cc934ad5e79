//! GitHub webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs webhook payloads using HMAC-SHA256 with the App's webhook
//! secret. The signature arrives in the `X-Hub-Signature-256` header as
//! `sha256=<hex>`.
//!
//! Verification is the first step in webhook processing. Requests with an
//! invalid signature are rejected before the body is parsed.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Computes the HMAC-SHA256 signature of a payload using the given secret.
///
/// Returns `None` only if the MAC cannot be keyed, which HMAC never refuses
/// in practice.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Option<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload);
    Some(mac.finalize().into_bytes().to_vec())
}

/// Formats a signature as a GitHub-style header value (`sha256=<lowercase hex>`).
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("{SIGNATURE_PREFIX}{}", hex::encode(signature))
}

/// Verifies a GitHub webhook signature.
///
/// Returns `false` (never panics) when the header or secret is absent or
/// empty, or when the header does not match the expected value exactly. The
/// comparison is done on the full header string in constant time, so hex
/// case variants and truncated digests are rejected.
///
/// # Arguments
///
/// * `signature_header` - The value of `X-Hub-Signature-256`, if present
/// * `secret` - The webhook secret configured on the GitHub App
/// * `raw_body` - The raw request body, exactly as received
///
/// # Examples
///
/// ```
/// use carbonflow::webhooks::{compute_signature, format_signature_header, verify_signature};
///
/// let body = b"{\"zen\":\"Keep it logically awesome.\"}";
/// let header = format_signature_header(&compute_signature(body, b"s3cret").unwrap());
///
/// assert!(verify_signature(Some(&header), b"s3cret", body));
/// assert!(!verify_signature(Some(&header), b"other", body));
/// assert!(!verify_signature(None, b"s3cret", body));
/// ```
pub fn verify_signature(signature_header: Option<&str>, secret: &[u8], raw_body: &[u8]) -> bool {
    let Some(header) = signature_header.filter(|h| !h.is_empty()) else {
        return false;
    };
    if secret.is_empty() {
        return false;
    }

    let Some(signature) = compute_signature(raw_body, secret) else {
        return false;
    };
    let expected = format_signature_header(&signature);

    // ct_eq on slices of unequal length returns false without inspecting contents
    header.as_bytes().ct_eq(expected.as_bytes()).into()
}
