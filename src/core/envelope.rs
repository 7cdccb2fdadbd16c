use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::AppError;

/// Opaque gateway-defined payload
pub type GatewayData = Map<String, Value>;

/// Uniform result shape returned to callers and callback senders
///
/// Serializes as `{"status":"success","data":{...}}` or
/// `{"status":"error","message":"...","details":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResponseEnvelope {
    Success {
        data: GatewayData,
    },
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
    },
}

impl ResponseEnvelope {
    pub fn success(data: GatewayData) -> Self {
        ResponseEnvelope::Success { data }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseEnvelope::Success { .. })
    }

    pub fn data(&self) -> Option<&GatewayData> {
        match self {
            ResponseEnvelope::Success { data } => Some(data),
            ResponseEnvelope::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ResponseEnvelope::Error { message, .. } => Some(message),
            ResponseEnvelope::Success { .. } => None,
        }
    }
}

impl From<&AppError> for ResponseEnvelope {
    fn from(err: &AppError) -> Self {
        err.to_envelope()
    }
}

impl From<Result<GatewayData, AppError>> for ResponseEnvelope {
    fn from(result: Result<GatewayData, AppError>) -> Self {
        match result {
            Ok(data) => ResponseEnvelope::Success { data },
            Err(err) => err.to_envelope(),
        }
    }
}
