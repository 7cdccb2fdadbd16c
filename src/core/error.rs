use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::envelope::ResponseEnvelope;

/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main error type
///
/// Every variant renders to the same `{status: "error", message, details?}`
/// envelope, so callers can treat local, transport and gateway failures alike.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Caller input rejected before any network I/O
    #[error("Validation error: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),

    /// Network failure or non-2xx HTTP status
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        details: Option<Value>,
    },

    /// Gateway answered but reported a business failure
    #[error("Gateway error: {message}")]
    Gateway {
        message: String,
        details: Option<Value>,
    },

    /// Inbound callback lacks required fields
    #[error("Malformed callback: missing {}", .0.join(", "))]
    MalformedCallback(Vec<String>),

    /// Inbound callback signature does not match
    #[error("Invalid callback signature")]
    InvalidSignature,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal faults
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        details: Option<Value>,
    },
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{} {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn transport(message: impl Into<String>, details: Option<Value>) -> Self {
        AppError::Transport {
            message: message.into(),
            details,
        }
    }

    pub fn gateway(message: impl Into<String>, details: Option<Value>) -> Self {
        AppError::Gateway {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Option<Value>) -> Self {
        AppError::Internal {
            message: message.into(),
            details,
        }
    }

    /// Human-readable message placed in the error envelope
    pub fn message(&self) -> String {
        match self {
            AppError::Transport { message, .. }
            | AppError::Gateway { message, .. }
            | AppError::Internal { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Optional diagnostic payload placed in the error envelope
    pub fn details(&self) -> Option<Value> {
        match self {
            AppError::Validation(fields) => Some(json!({ "fields": fields })),
            AppError::MalformedCallback(missing) => Some(json!({ "missing": missing })),
            AppError::Transport { details, .. }
            | AppError::Gateway { details, .. }
            | AppError::Internal { details, .. } => details.clone(),
            AppError::InvalidSignature | AppError::Configuration(_) => None,
        }
    }

    pub fn to_envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope::Error {
            message: self.message(),
            details: self.details(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_envelope())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedCallback(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AppError::Transport { .. } => StatusCode::BAD_GATEWAY,
            AppError::Gateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
