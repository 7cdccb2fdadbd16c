pub mod callback_validator;

pub use callback_validator::{CallbackValidator, REQUIRED_CALLBACK_FIELDS};
