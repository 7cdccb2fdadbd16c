use serde_json::Value;
use std::fmt;
use tracing::{info, warn};

use super::super::models::notification::field_str;
use crate::config::DuitkuConfig;
use crate::core::{signatures_match, AppError, GatewayData, Result, SignatureAlgorithm, SignatureScheme};

/// Fields every callback must carry, in the order they are reported when missing
pub const REQUIRED_CALLBACK_FIELDS: [&str; 4] =
    ["merchantCode", "amount", "merchantOrderId", "signature"];

/// Verifies inbound payment-status callbacks
///
/// Signature: digest(merchantCode + amount + merchantOrderId + merchantKey).
#[derive(Clone)]
pub struct CallbackValidator {
    merchant_key: String,
    merchant_code: String,
    algorithm: SignatureAlgorithm,
}

impl fmt::Debug for CallbackValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackValidator")
            .field("merchant_code", &self.merchant_code)
            .field("merchant_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl CallbackValidator {
    pub fn new(merchant_key: impl Into<String>, merchant_code: impl Into<String>) -> Self {
        Self {
            merchant_key: merchant_key.into(),
            merchant_code: merchant_code.into(),
            algorithm: SignatureScheme::default().callback,
        }
    }

    pub fn from_config(config: &DuitkuConfig) -> Self {
        Self::new(config.merchant_key.clone(), config.merchant_code.clone())
    }

    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Signature the gateway is expected to send for this merchant
    pub fn expected_signature(&self, amount: &str, merchant_order_id: &str) -> String {
        self.algorithm.sign(&[
            self.merchant_code.as_str(),
            amount,
            merchant_order_id,
            self.merchant_key.as_str(),
        ])
    }

    /// Parse and authenticate a raw callback body
    ///
    /// Returns every received field on success. Missing required fields are
    /// reported before any signature work happens.
    pub fn handle_callback(&self, raw_body: &[u8]) -> Result<GatewayData> {
        let fields = parse_callback_body(raw_body);

        let missing: Vec<String> = REQUIRED_CALLBACK_FIELDS
            .iter()
            .filter(|key| field_str(&fields, key).is_none())
            .map(|key| key.to_string())
            .collect();

        if !missing.is_empty() {
            warn!(missing = ?missing, "Rejected malformed Duitku callback");
            return Err(AppError::MalformedCallback(missing));
        }

        // Required fields are present past this point
        let merchant_code = field_str(&fields, "merchantCode").unwrap_or_default();
        let amount = field_str(&fields, "amount").unwrap_or_default();
        let merchant_order_id = field_str(&fields, "merchantOrderId").unwrap_or_default();
        let signature = field_str(&fields, "signature").unwrap_or_default();

        if merchant_code != self.merchant_code {
            warn!(
                merchant_order_id = %merchant_order_id,
                merchant_code = %merchant_code,
                "Rejected Duitku callback for another merchant"
            );
            return Err(AppError::InvalidSignature);
        }

        let expected = self.expected_signature(&amount, &merchant_order_id);
        if !signatures_match(&expected, &signature) {
            warn!(
                merchant_order_id = %merchant_order_id,
                "Rejected Duitku callback with invalid signature"
            );
            return Err(AppError::InvalidSignature);
        }

        info!(
            merchant_order_id = %merchant_order_id,
            amount = %amount,
            "Verified Duitku callback"
        );

        Ok(fields)
    }
}

/// Decode a flat JSON object or a form-urlencoded body
///
/// Anything unreadable decodes to an empty map, which then fails the
/// required-field check.
fn parse_callback_body(raw_body: &[u8]) -> GatewayData {
    let trimmed = raw_body.trim_ascii_start();

    if trimmed.starts_with(b"{") {
        return match serde_json::from_slice::<Value>(trimmed) {
            Ok(Value::Object(fields)) => fields,
            _ => GatewayData::new(),
        };
    }

    url::form_urlencoded::parse(raw_body)
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}
