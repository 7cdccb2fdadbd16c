use crate::core::{AppError, Result};
use crate::gateway::models::invoice::is_absolute_http_url;
use crate::gateway::{Environment, InvoiceRequest};
use std::env;
use std::fmt;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub duitku: DuitkuConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

impl AppConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> String {
        format!("duitku={},actix_web=info", self.log_level)
    }
}

/// Merchant credentials and URLs supplied by the integrating application
#[derive(Clone)]
pub struct DuitkuConfig {
    pub merchant_key: String,
    pub merchant_code: String,
    pub sandbox_mode: bool,
    pub callback_url: String,
    pub return_url: String,
}

impl fmt::Debug for DuitkuConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuitkuConfig")
            .field("merchant_key", &"<redacted>")
            .field("merchant_code", &self.merchant_code)
            .field("sandbox_mode", &self.sandbox_mode)
            .field("callback_url", &self.callback_url)
            .field("return_url", &self.return_url)
            .finish()
    }
}

impl DuitkuConfig {
    pub fn new(merchant_key: impl Into<String>, merchant_code: impl Into<String>) -> Self {
        Self {
            merchant_key: merchant_key.into(),
            merchant_code: merchant_code.into(),
            sandbox_mode: true,
            callback_url: "http://example.com/callback".to_string(),
            return_url: "http://example.com/return".to_string(),
        }
    }

    /// Load the gateway section from `DUITKU_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            merchant_key: env::var("DUITKU_MERCHANT_KEY").map_err(|_| {
                AppError::Configuration("DUITKU_MERCHANT_KEY not set".to_string())
            })?,
            merchant_code: env::var("DUITKU_MERCHANT_CODE").map_err(|_| {
                AppError::Configuration("DUITKU_MERCHANT_CODE not set".to_string())
            })?,
            sandbox_mode: match env::var("DUITKU_SANDBOX_MODE") {
                Ok(value) => parse_bool(&value).ok_or_else(|| {
                    AppError::Configuration("Invalid DUITKU_SANDBOX_MODE".to_string())
                })?,
                Err(_) => true,
            },
            callback_url: env::var("DUITKU_CALLBACK_URL")
                .unwrap_or_else(|_| "http://example.com/callback".to_string()),
            return_url: env::var("DUITKU_RETURN_URL")
                .unwrap_or_else(|_| "http://example.com/return".to_string()),
        })
    }

    pub fn environment(&self) -> Environment {
        Environment::from_sandbox_flag(self.sandbox_mode)
    }

    /// Invoice request using the configured callback and return URLs
    pub fn invoice_request(
        &self,
        payment_amount: u64,
        payment_method: impl Into<String>,
        merchant_order_id: impl Into<String>,
        product_details: impl Into<String>,
        customer_va_name: impl Into<String>,
        email: impl Into<String>,
    ) -> InvoiceRequest {
        InvoiceRequest::new(
            payment_amount,
            payment_method,
            merchant_order_id,
            product_details,
            customer_va_name,
            email,
            self.callback_url.clone(),
            self.return_url.clone(),
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.merchant_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "Merchant key must not be empty".to_string(),
            ));
        }

        if self.merchant_code.trim().is_empty() {
            return Err(AppError::Configuration(
                "Merchant code must not be empty".to_string(),
            ));
        }

        if !is_absolute_http_url(&self.callback_url) {
            return Err(AppError::Configuration(
                "Callback URL must be an absolute http(s) URL".to_string(),
            ));
        }

        if !is_absolute_http_url(&self.return_url) {
            return Err(AppError::Configuration(
                "Return URL must be an absolute http(s) URL".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            server: ServerConfig::from_env()?,
            duitku: DuitkuConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "Server port must be greater than 0".to_string(),
            ));
        }

        self.duitku.validate()
    }
}
