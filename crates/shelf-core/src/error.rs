//! Error types module
//!
//! Errors raised by the pure parts of the pipeline. Storage, database and pipeline errors
//! live in their own crates next to the code that produces them.

/// Numeric fields of a draft that could not be parsed during assembly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid price: {0:?}")]
    Price(String),

    #[error("Invalid offer percentage: {0:?}")]
    OfferPercentage(String),
}

impl ParseError {
    /// Name of the draft field that failed to parse.
    pub fn field(&self) -> &'static str {
        match self {
            ParseError::Price(_) => "price",
            ParseError::OfferPercentage(_) => "offer_percentage",
        }
    }
}
