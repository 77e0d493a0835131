//! udpspoof-rs Core Library
//!
//! This crate provides the error taxonomy and the shared address types used
//! by every other crate in the udpspoof-rs workspace.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::MacAddr;
