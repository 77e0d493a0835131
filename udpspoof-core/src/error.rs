//! Error types for udpspoof-rs

use thiserror::Error;

/// Result type alias for udpspoof operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for udpspoof-rs
#[derive(Error, Debug)]
pub enum Error {
    /// A frame description is inconsistent or incomplete
    #[error("Validation error on '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// A header field could not be written
    #[error("Serialization error: {field} {reason}")]
    Serialization { field: &'static str, reason: String },

    /// Writing the frame to the interface failed
    #[error("Injection error on interface '{interface}': {reason}")]
    Injection { interface: String, reason: String },

    /// Invalid command-line parameter
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Interface not found
    #[error("Interface '{0}' not found")]
    InterfaceNotFound(String),

    /// Interface error
    #[error("Interface error: {0}")]
    Interface(String),

    /// Packet parsing error
    #[error("Packet parsing error: {0}")]
    PacketParsing(String),

    /// Network I/O error
    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error for the named field
    pub fn validation<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error for a length field that overflowed
    pub fn length_overflow(field: &'static str, size: usize, max: usize) -> Self {
        Error::Serialization {
            field,
            reason: format!("cannot represent {} bytes (max {})", size, max),
        }
    }

    /// Create a serialization error for a field the serializer never filled
    pub fn unresolved(field: &'static str) -> Self {
        Error::Serialization {
            field,
            reason: "was not resolved before writing".to_string(),
        }
    }

    /// Create an injection error for the named interface
    pub fn injection<I: Into<String>, R: Into<String>>(interface: I, reason: R) -> Self {
        Error::Injection {
            interface: interface.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a parsing error with a custom message
    pub fn parsing<S: Into<String>>(msg: S) -> Self {
        Error::PacketParsing(msg.into())
    }
}
