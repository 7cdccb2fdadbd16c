//! Duitku Payment Gateway SDK
//!
//! Signed requests for listing payment methods, creating invoices and
//! checking transaction status, plus verification of inbound payment-status
//! callbacks and an actix-web receiver for them.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::callbacks;
pub use modules::gateway;

pub use callbacks::{CallbackHandler, CallbackNotification, CallbackValidator, PaymentOutcome};
pub use crate::core::{AppError, GatewayData, ResponseEnvelope, SignatureAlgorithm, SignatureScheme};
pub use gateway::{DuitkuClient, Environment, InvoiceRequest};
