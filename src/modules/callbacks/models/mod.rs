pub mod notification;

pub use notification::{CallbackNotification, PaymentOutcome};
