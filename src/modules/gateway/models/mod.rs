pub mod environment;
pub mod invoice;
pub mod payment_method;
pub mod transaction_status;

pub use environment::{Environment, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use invoice::{
    Address, CustomerDetail, InvoiceRequest, ItemDetail, DEFAULT_EXPIRY_PERIOD, MIN_INVOICE_AMOUNT,
};
pub use payment_method::PaymentMethod;
pub use transaction_status::{TransactionState, TransactionStatus};
