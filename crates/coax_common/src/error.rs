use thiserror::Error;

/// Errors raised while interpreting values exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommonError {
    /// The `timestamp` field was not an RFC 3339 date-time string.
    #[error("invalid timestamp {value:?}: {reason}")]
    Timestamp { value: String, reason: String },

    /// A position value could not be read as a number.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// A manual position frame was not `"<coax> <cross>"`.
    #[error("malformed position frame {0:?}")]
    MalformedFrame(String),

    /// A field that must be a scalar held an array or object.
    #[error("field `{0}` is not a scalar")]
    NonScalar(String),
}
