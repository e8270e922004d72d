//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the connector.
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration option is missing or empty. Fatal at initialization.
    #[error("Configuration option: '{key}' for the Project Director connector is not set")]
    Configuration { key: String },

    /// Malformed input handed to the connector.
    #[error("validation error: {0}")]
    Validation(String),

    /// The vendor answered with a SOAP fault or an unexpected response.
    #[error("vendor error: {0}")]
    Vendor(String),

    /// HTTP transport errors.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// XML reading or writing failed.
    #[error("xml error: {0}")]
    Xml(String),

    /// The XLIFF payload does not have the expected shape.
    #[error("xliff error: {0}")]
    Xliff(String),

    /// Base64 payload decoding.
    #[error("encoding error: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors raised while resolving configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }
}

// Convenience constructors
impl Error {
    pub fn configuration(key: impl Into<String>) -> Self {
        Self::Configuration { key: key.into() }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn vendor(msg: impl Into<String>) -> Self {
        Self::Vendor(msg.into())
    }

    pub fn xml(msg: impl Into<String>) -> Self {
        Self::Xml(msg.into())
    }

    pub fn xliff(msg: impl Into<String>) -> Self {
        Self::Xliff(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_names_key() {
        let err = Error::configuration("url");
        assert_eq!(
            err.to_string(),
            "Configuration option: 'url' for the Project Director connector is not set"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn vendor_error_is_not_configuration() {
        assert!(!Error::vendor("fault").is_configuration());
    }
}
