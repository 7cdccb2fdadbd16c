//! Request and callback signatures.
//!
//! Every signature is the lowercase hex digest of a plain concatenation of
//! fields, with the merchant key always last.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Digest algorithm used for a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    Md5,
    Sha256,
}

impl SignatureAlgorithm {
    /// Digest the concatenation of `parts` in order
    pub fn sign(&self, parts: &[&str]) -> String {
        match self {
            SignatureAlgorithm::Md5 => hex_digest::<Md5>(parts),
            SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(parts),
        }
    }
}

fn hex_digest<D: Digest>(parts: &[&str]) -> String {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Algorithm choice per gateway operation
///
/// The default mirrors the gateway's published protocol: SHA-256 for the
/// payment-method listing, MD5 everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureScheme {
    pub payment_methods: SignatureAlgorithm,
    pub inquiry: SignatureAlgorithm,
    pub transaction_status: SignatureAlgorithm,
    pub callback: SignatureAlgorithm,
}

impl SignatureScheme {
    /// Same algorithm for every operation
    pub fn uniform(algorithm: SignatureAlgorithm) -> Self {
        Self {
            payment_methods: algorithm,
            inquiry: algorithm,
            transaction_status: algorithm,
            callback: algorithm,
        }
    }
}

impl Default for SignatureScheme {
    fn default() -> Self {
        Self {
            payment_methods: SignatureAlgorithm::Sha256,
            inquiry: SignatureAlgorithm::Md5,
            transaction_status: SignatureAlgorithm::Md5,
            callback: SignatureAlgorithm::Md5,
        }
    }
}

/// Constant-time equality for signature strings
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
