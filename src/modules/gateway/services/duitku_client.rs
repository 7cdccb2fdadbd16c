use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, info, warn};

use super::super::models::{Environment, InvoiceRequest};
use crate::config::DuitkuConfig;
use crate::core::timezone::gateway_datetime;
use crate::core::{AppError, GatewayData, Result, SignatureScheme};

pub const PAYMENT_METHODS_PATH: &str = "/paymentmethod/getpaymentmethod";
pub const INQUIRY_PATH: &str = "/v2/inquiry";
pub const TRANSACTION_STATUS_PATH: &str = "/transactionStatus";

/// Duitku API client
///
/// Holds the merchant credentials and the environment chosen at construction.
/// Nothing is mutated afterwards, so one instance (or cheap clones of it) can
/// be shared across tasks.
///
/// API Documentation: https://docs.duitku.com/api/en/
#[derive(Clone)]
pub struct DuitkuClient {
    client: Client,
    merchant_key: String,
    merchant_code: String,
    environment: Environment,
    base_url: String,
    signatures: SignatureScheme,
}

impl fmt::Debug for DuitkuClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuitkuClient")
            .field("merchant_code", &self.merchant_code)
            .field("merchant_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("signatures", &self.signatures)
            .finish()
    }
}

#[derive(Serialize)]
struct PaymentMethodsParams<'a> {
    merchantcode: &'a str,
    amount: u64,
    datetime: &'a str,
    signature: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InquiryParams<'a> {
    merchant_code: &'a str,
    #[serde(flatten)]
    request: &'a InvoiceRequest,
    signature: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionStatusParams<'a> {
    merchant_code: &'a str,
    merchant_order_id: &'a str,
    signature: &'a str,
}

impl DuitkuClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `merchant_key` - Shared secret from the merchant dashboard, only ever hashed
    /// * `merchant_code` - Merchant identifier
    /// * `environment` - Sandbox or production; selects the base URL
    pub fn new(
        merchant_key: impl Into<String>,
        merchant_code: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            client: Client::new(),
            merchant_key: merchant_key.into(),
            merchant_code: merchant_code.into(),
            environment,
            base_url: environment.base_url().to_string(),
            signatures: SignatureScheme::default(),
        }
    }

    pub fn from_config(config: &DuitkuConfig) -> Self {
        Self::new(
            config.merchant_key.clone(),
            config.merchant_code.clone(),
            config.environment(),
        )
    }

    /// Use a pre-configured HTTP client (timeouts, proxies, TLS settings)
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Point the client at a different host, e.g. a local mock gateway
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_signature_scheme(mut self, signatures: SignatureScheme) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn merchant_code(&self) -> &str {
        &self.merchant_code
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Signature for the payment-method listing: merchantCode + amount + datetime + key
    pub fn payment_methods_signature(&self, amount: u64, datetime: &str) -> String {
        self.signatures.payment_methods.sign(&[
            self.merchant_code.as_str(),
            amount.to_string().as_str(),
            datetime,
            self.merchant_key.as_str(),
        ])
    }

    /// Signature for invoice creation: merchantCode + orderId + amount + key
    pub fn invoice_signature(&self, merchant_order_id: &str, amount: u64) -> String {
        self.signatures.inquiry.sign(&[
            self.merchant_code.as_str(),
            merchant_order_id,
            amount.to_string().as_str(),
            self.merchant_key.as_str(),
        ])
    }

    /// Signature for the status lookup: merchantCode + orderId + key
    pub fn transaction_status_signature(&self, merchant_order_id: &str) -> String {
        self.signatures.transaction_status.sign(&[
            self.merchant_code.as_str(),
            merchant_order_id,
            self.merchant_key.as_str(),
        ])
    }

    /// List the payment methods available for an amount
    pub async fn list_payment_methods(&self, amount: u64) -> Result<GatewayData> {
        self.list_payment_methods_at(amount, Utc::now()).await
    }

    /// Same as [`list_payment_methods`](Self::list_payment_methods) with an explicit timestamp
    pub async fn list_payment_methods_at(
        &self,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Result<GatewayData> {
        if amount == 0 {
            return Err(AppError::validation("amount", "must be a positive integer"));
        }

        let datetime = gateway_datetime(now);
        let signature = self.payment_methods_signature(amount, &datetime);

        info!(amount, datetime = %datetime, "Listing Duitku payment methods");

        let params = PaymentMethodsParams {
            merchantcode: &self.merchant_code,
            amount,
            datetime: &datetime,
            signature: &signature,
        };

        self.send_request(PAYMENT_METHODS_PATH, &params).await
    }

    /// Create an invoice and return the gateway payload (including `paymentUrl`)
    ///
    /// The request is validated first; a validation failure never reaches the network.
    pub async fn create_invoice(&self, request: &InvoiceRequest) -> Result<GatewayData> {
        request.validate()?;

        let signature = self.invoice_signature(&request.merchant_order_id, request.payment_amount);

        info!(
            merchant_order_id = %request.merchant_order_id,
            amount = request.payment_amount,
            payment_method = %request.payment_method,
            "Creating Duitku invoice"
        );

        let params = InquiryParams {
            merchant_code: &self.merchant_code,
            request,
            signature: &signature,
        };

        let data = self.send_request(INQUIRY_PATH, &params).await?;
        interpret_inquiry_response(data).inspect_err(|e| {
            warn!(
                merchant_order_id = %request.merchant_order_id,
                error = %e,
                "Duitku rejected invoice"
            );
        })
    }

    /// Look up the status of a transaction by merchant order id
    pub async fn check_transaction_status(&self, merchant_order_id: &str) -> Result<GatewayData> {
        if merchant_order_id.trim().is_empty() {
            return Err(AppError::validation("merchantOrderId", "is required"));
        }

        let signature = self.transaction_status_signature(merchant_order_id);

        info!(merchant_order_id, "Checking Duitku transaction status");

        let params = TransactionStatusParams {
            merchant_code: &self.merchant_code,
            merchant_order_id,
            signature: &signature,
        };

        self.send_request(TRANSACTION_STATUS_PATH, &params).await
    }

    /// POST `params` as JSON and return the response object
    ///
    /// Network failures, non-2xx statuses and non-object bodies all become
    /// `AppError::Transport`.
    async fn send_request<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<GatewayData> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!(url = %url, "Sending Duitku request");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(params)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connection failed"
                } else {
                    "request failed"
                };
                warn!(endpoint, reason, error = %e, "Duitku request did not complete");
                AppError::transport(
                    format!("Duitku gateway unavailable: {}", reason),
                    Some(json!({ "error": e.to_string() })),
                )
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::transport(
                "Failed to read Duitku response",
                Some(json!({ "httpStatus": status.as_u16(), "error": e.to_string() })),
            )
        })?;

        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "Duitku returned an error status");
            return Err(AppError::transport(
                format!("Duitku API error - HTTP {}", status.as_u16()),
                Some(json!({ "httpStatus": status.as_u16(), "body": body_as_value(&body) })),
            ));
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(data)) => Ok(data),
            Ok(other) => Err(AppError::transport(
                "Unexpected Duitku response: not a JSON object",
                Some(json!({ "httpStatus": status.as_u16(), "body": other })),
            )),
            Err(e) => Err(AppError::transport(
                format!("Failed to parse Duitku response: {}", e),
                Some(json!({ "httpStatus": status.as_u16(), "body": body })),
            )),
        }
    }
}

fn body_as_value(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Turn a 2xx inquiry payload into success or a gateway-reported failure
fn interpret_inquiry_response(data: GatewayData) -> Result<GatewayData> {
    if let Some(payment_url) = data.get("paymentUrl") {
        let unavailable = match payment_url {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if unavailable {
            return Err(AppError::gateway(
                "payment not available",
                Some(Value::Object(data)),
            ));
        }
    }

    if let Some(code) = data.get("statusCode") {
        if status_code_is_failure(code) {
            let message = data
                .get("statusMessage")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .unwrap_or_else(|| format!("Duitku returned status code {}", code));
            return Err(AppError::gateway(message, Some(Value::Object(data))));
        }
    }

    Ok(data)
}

fn status_code_is_failure(code: &Value) -> bool {
    match code {
        Value::Null => false,
        Value::String(s) if s.trim().is_empty() => false,
        Value::String(s) => s.trim().parse::<i64>().map_or(true, |n| n != 0),
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        _ => true,
    }
}
