use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::core::{AppError, GatewayData, Result};

/// Outcome reported by the callback `resultCode`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    Success,
    Failed,
    Unknown(String),
}

impl PaymentOutcome {
    pub fn from_result_code(code: &str) -> Self {
        match code {
            "00" => PaymentOutcome::Success,
            "01" => PaymentOutcome::Failed,
            other => PaymentOutcome::Unknown(other.to_string()),
        }
    }
}

/// Typed view of a verified payment-status callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackNotification {
    pub merchant_code: String,
    pub amount: String,
    pub merchant_order_id: String,
    pub result_code: String,
    pub reference: Option<String>,
    pub payment_code: Option<String>,
    pub product_detail: Option<String>,
    pub additional_param: Option<String>,
    pub merchant_user_id: Option<String>,
    pub publisher_order_id: Option<String>,
    pub settlement_date: Option<String>,
    pub issuer_code: Option<String>,
}

impl CallbackNotification {
    pub fn from_fields(fields: &GatewayData) -> Result<Self> {
        let required = |key: &str| {
            field_str(fields, key).ok_or_else(|| AppError::MalformedCallback(vec![key.to_string()]))
        };

        Ok(Self {
            merchant_code: required("merchantCode")?,
            amount: required("amount")?,
            merchant_order_id: required("merchantOrderId")?,
            result_code: field_str(fields, "resultCode").unwrap_or_default(),
            reference: field_str(fields, "reference"),
            payment_code: field_str(fields, "paymentCode"),
            product_detail: field_str(fields, "productDetail"),
            additional_param: field_str(fields, "additionalParam"),
            merchant_user_id: field_str(fields, "merchantUserId"),
            publisher_order_id: field_str(fields, "publisherOrderId"),
            settlement_date: field_str(fields, "settlementDate"),
            issuer_code: field_str(fields, "issuerCode"),
        })
    }

    pub fn outcome(&self) -> PaymentOutcome {
        PaymentOutcome::from_result_code(&self.result_code)
    }
}

/// Scalar field as a string; empty strings and non-scalars count as absent
///
/// Whole-valued JSON floats (`50000.0`) render without the fraction so they
/// sign the same as the integer the gateway hashed.
pub(crate) fn field_str(fields: &GatewayData, key: &str) -> Option<String> {
    let value = match fields.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_str(n),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Largest magnitude below which every whole f64 is an exact integer
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

fn number_str(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT_INT => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}
