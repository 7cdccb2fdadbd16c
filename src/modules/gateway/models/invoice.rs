use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

use crate::core::{AppError, FieldError, Result};

/// Smallest invoice amount the gateway accepts, in minor units
pub const MIN_INVOICE_AMOUNT: u64 = 10_000;

/// Default payment window in minutes (24 hours)
pub const DEFAULT_EXPIRY_PERIOD: u32 = 1440;

pub const MAX_ORDER_ID_LEN: usize = 50;
pub const MAX_PRODUCT_DETAILS_LEN: usize = 255;
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;
pub const MAX_PHONE_NUMBER_LEN: usize = 20;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("Valid email pattern")
});

/// Invoice creation request for the v2 inquiry endpoint
///
/// Field names serialize to the gateway's camelCase wire names. The merchant
/// code and signature are added by the client when the request is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    /// Amount in minor currency units
    pub payment_amount: u64,

    /// Gateway payment method code (e.g. "VC", "BC", "M2")
    pub payment_method: String,

    /// Merchant order identifier, unique per merchant
    pub merchant_order_id: String,

    pub product_details: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_param: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_user_info: Option<String>,

    /// Payer name shown on the virtual account
    pub customer_va_name: String,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_details: Option<Vec<ItemDetail>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_detail: Option<CustomerDetail>,

    pub callback_url: String,

    pub return_url: String,

    /// Payment window in minutes
    pub expiry_period: u32,
}

/// Invoice line item; `price` is the line total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    pub name: String,
    pub price: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    pub country_code: String,
}

impl InvoiceRequest {
    /// Create a request with the mandatory fields and the default expiry
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        payment_amount: u64,
        payment_method: impl Into<String>,
        merchant_order_id: impl Into<String>,
        product_details: impl Into<String>,
        customer_va_name: impl Into<String>,
        email: impl Into<String>,
        callback_url: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            payment_amount,
            payment_method: payment_method.into(),
            merchant_order_id: merchant_order_id.into(),
            product_details: product_details.into(),
            additional_param: None,
            merchant_user_info: None,
            customer_va_name: customer_va_name.into(),
            email: email.into(),
            phone_number: None,
            item_details: None,
            customer_detail: None,
            callback_url: callback_url.into(),
            return_url: return_url.into(),
            expiry_period: DEFAULT_EXPIRY_PERIOD,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_expiry_period(mut self, minutes: u32) -> Self {
        self.expiry_period = minutes;
        self
    }

    pub fn with_item_details(mut self, items: Vec<ItemDetail>) -> Self {
        self.item_details = Some(items);
        self
    }

    pub fn with_customer_detail(mut self, customer: CustomerDetail) -> Self {
        self.customer_detail = Some(customer);
        self
    }

    pub fn with_additional_param(mut self, param: impl Into<String>) -> Self {
        self.additional_param = Some(param.into());
        self
    }

    pub fn with_merchant_user_info(mut self, info: impl Into<String>) -> Self {
        self.merchant_user_info = Some(info.into());
        self
    }

    /// Check every field and report all violations at once
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.payment_amount < MIN_INVOICE_AMOUNT {
            errors.push(FieldError::new(
                "paymentAmount",
                format!("must be at least {}", MIN_INVOICE_AMOUNT),
            ));
        }

        if self.payment_method.trim().is_empty() {
            errors.push(FieldError::new("paymentMethod", "is required"));
        }

        check_required_len(
            &mut errors,
            "merchantOrderId",
            &self.merchant_order_id,
            MAX_ORDER_ID_LEN,
        );
        check_required_len(
            &mut errors,
            "productDetails",
            &self.product_details,
            MAX_PRODUCT_DETAILS_LEN,
        );
        check_required_len(
            &mut errors,
            "customerVaName",
            &self.customer_va_name,
            MAX_CUSTOMER_NAME_LEN,
        );

        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "is not a valid email address"));
        }

        if let Some(phone) = &self.phone_number {
            if phone.chars().count() > MAX_PHONE_NUMBER_LEN {
                errors.push(FieldError::new(
                    "phoneNumber",
                    format!("must be at most {} characters", MAX_PHONE_NUMBER_LEN),
                ));
            }
        }

        check_url(&mut errors, "callbackUrl", &self.callback_url);
        check_url(&mut errors, "returnUrl", &self.return_url);

        if self.expiry_period < 1 {
            errors.push(FieldError::new("expiryPeriod", "must be at least 1 minute"));
        }

        if let Some(items) = &self.item_details {
            self.check_items(&mut errors, items);
        }

        if let Some(customer) = &self.customer_detail {
            if !customer.email.is_empty() && !is_valid_email(&customer.email) {
                errors.push(FieldError::new(
                    "customerDetail.email",
                    "is not a valid email address",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    fn check_items(&self, errors: &mut Vec<FieldError>, items: &[ItemDetail]) {
        for (i, item) in items.iter().enumerate() {
            if item.name.trim().is_empty() {
                errors.push(FieldError::new(format!("itemDetails[{}].name", i), "is required"));
            }
            if item.quantity == 0 {
                errors.push(FieldError::new(
                    format!("itemDetails[{}].quantity", i),
                    "must be at least 1",
                ));
            }
        }

        // The gateway rejects invoices whose line totals disagree with the amount
        if items.is_empty() {
            return;
        }
        match items
            .iter()
            .try_fold(0u64, |total, item| total.checked_add(item.price))
        {
            None => errors.push(FieldError::new(
                "itemDetails",
                "prices overflow the maximum amount",
            )),
            Some(total) if total != self.payment_amount => errors.push(FieldError::new(
                "itemDetails",
                format!(
                    "prices sum to {} but paymentAmount is {}",
                    total, self.payment_amount
                ),
            )),
            Some(_) => {}
        }
    }
}

fn check_required_len(errors: &mut Vec<FieldError>, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    } else if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
}

fn check_url(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if !is_absolute_http_url(value) {
        errors.push(FieldError::new(field, "must be an absolute http(s) URL"));
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_absolute_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
