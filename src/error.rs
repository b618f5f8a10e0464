//! Error types for ipmikit
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using IpmiError
pub type Result<T> = std::result::Result<T, IpmiError>;

/// Unified error type for ipmikit operations
#[derive(Debug, Error)]
pub enum IpmiError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    /// A field required more bytes than the buffer holds.
    ///
    /// Raised by every unpack primitive instead of reading out of bounds, so
    /// a corrupted or malicious controller reply can never crash a parse.
    #[error("truncated data: need {needed} bytes, buffer has {got}")]
    Truncated { needed: usize, got: usize },

    #[error("malformed response: {0}")]
    Malformed(String),

    // -------------------------------------------------------------------------
    // Exchange Errors
    // -------------------------------------------------------------------------
    /// The controller answered with a non-zero completion code.
    ///
    /// `message` is resolved from the command-specific table first, then the
    /// universal table, else a generic unknown-code text.
    #[error("completion code {code:#04x}: {message}")]
    Completion { code: u8, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("protocol error: {0}")]
    Protocol(String),
}
