pub mod duitku_client;

pub use duitku_client::{
    DuitkuClient, INQUIRY_PATH, PAYMENT_METHODS_PATH, TRANSACTION_STATUS_PATH,
};
