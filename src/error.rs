//! Error types for the primepayer library

use thiserror::Error;

/// Result type alias for primepayer operations
pub type Result<T> = std::result::Result<T, PrimePayerError>;

/// Main error type for primepayer operations
#[derive(Error, Debug)]
pub enum PrimePayerError {
    /// The inbound field set has no `sign` entry
    #[error("Signature missing: notification has no sign field")]
    SignatureMissing,

    /// The supplied signature does not match the one computed with the shop secret
    #[error("Signature mismatch: notification was not signed with this shop's secret")]
    SignatureMismatch,

    /// `payment` or `systemPayment` is not a base-10 integer
    #[error("Invalid payment id in {field}: {value:?}")]
    InvalidPaymentId { field: String, value: String },

    /// `amount` is not a decimal number
    #[error("Invalid amount {value:?}: {source}")]
    InvalidAmount {
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PrimePayerError {
    /// Create an invalid payment id error
    pub fn invalid_payment_id(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidPaymentId {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an invalid amount error
    pub fn invalid_amount(value: impl Into<String>, source: rust_decimal::Error) -> Self {
        Self::InvalidAmount {
            value: value.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the error means the notification failed authentication,
    /// as opposed to carrying a malformed but authentic payload
    pub fn is_signature_error(&self) -> bool {
        matches!(self, Self::SignatureMissing | Self::SignatureMismatch)
    }
}
