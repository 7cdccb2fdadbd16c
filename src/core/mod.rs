pub mod envelope;
pub mod error;
pub mod signature;
pub mod timezone;

pub use envelope::{GatewayData, ResponseEnvelope};
pub use error::{AppError, FieldError, Result};
pub use signature::{signatures_match, SignatureAlgorithm, SignatureScheme};
