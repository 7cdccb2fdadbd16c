pub mod models;
pub mod services;

pub use models::{
    Address, CustomerDetail, Environment, InvoiceRequest, ItemDetail, PaymentMethod,
    TransactionState, TransactionStatus,
};
pub use services::DuitkuClient;
