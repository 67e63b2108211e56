pub mod currency;
pub mod search;

pub use currency::Currency;
pub use search::{OfferShape, RawPrice, Service};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
