//! # Error Types — Core Validation Failures
//!
//! Defines the error type for constructor-level validation in `hpl-core`.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! Lifecycle and registry errors live in their own crates; this enum only
//! covers failures that can occur while constructing core primitives.

use thiserror::Error;

/// Validation errors raised by `hpl-core` constructors.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A timestamp string failed parsing or violated the UTC-only policy.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// An air waybill number did not match its required format.
    #[error("invalid {kind} waybill number: {value:?}")]
    InvalidWaybill {
        /// Which waybill kind was being constructed ("MAWB" or "HAWB").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
