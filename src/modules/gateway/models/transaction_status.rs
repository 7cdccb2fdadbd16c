use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payment_method::string_or_number;
use crate::core::{AppError, GatewayData, Result};

/// Typed view of a transaction-status payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    pub merchant_order_id: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub fee: String,
    #[serde(deserialize_with = "string_or_number")]
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
}

/// Transaction state derived from the gateway status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionState {
    Success,
    Pending,
    Failed,
    Unknown(String),
}

impl TransactionStatus {
    pub fn from_data(data: &GatewayData) -> Result<Self> {
        serde_json::from_value(Value::Object(data.clone())).map_err(|e| {
            AppError::gateway(
                format!("Unexpected transaction status payload: {}", e),
                Some(Value::Object(data.clone())),
            )
        })
    }

    pub fn state(&self) -> TransactionState {
        match self.status_code.as_str() {
            "00" => TransactionState::Success,
            "01" => TransactionState::Pending,
            "02" => TransactionState::Failed,
            other => TransactionState::Unknown(other.to_string()),
        }
    }
}
