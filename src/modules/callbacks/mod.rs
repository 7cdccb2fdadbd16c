pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::{CallbackController, CallbackHandler};
pub use models::{CallbackNotification, PaymentOutcome};
pub use services::CallbackValidator;
