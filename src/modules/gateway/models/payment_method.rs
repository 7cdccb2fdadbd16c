use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::{AppError, GatewayData, Result};

/// One entry of the `paymentFee` list returned by the payment-method endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub payment_method: String,
    pub payment_name: String,
    #[serde(default)]
    pub payment_image: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_fee: String,
}

impl PaymentMethod {
    /// Extract the typed list from a successful listing payload
    ///
    /// A payload without `paymentFee` yields an empty list.
    pub fn from_data(data: &GatewayData) -> Result<Vec<PaymentMethod>> {
        match data.get("paymentFee") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(fees) => serde_json::from_value(fees.clone()).map_err(|e| {
                AppError::gateway(
                    format!("Unexpected payment method payload: {}", e),
                    Some(fees.clone()),
                )
            }),
        }
    }
}

/// The gateway sends some numeric fields as strings and others as numbers
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
