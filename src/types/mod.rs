use thiserror::Error;

mod domain_types;
mod ids;
mod kind;

pub use domain_types::*;
pub use ids::*;
pub use kind::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unknown resource kind: {0}")]
    UnknownKind(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },

    #[error("Invalid app credentials: {reason}")]
    InvalidCredentials { reason: String },
}
