//! Message Module
//!
//! The shared contract every wire command implements.
//!
//! ## Wire Format (per exchange)
//! ```text
//! request:  [command-specific bytes]
//! reply:    ┌────────────────┬───────────────────────────┐
//!           │ Completion (1) │ command-specific bytes    │
//!           └────────────────┴───────────────────────────┘
//! ```
//!
//! Multi-byte integer fields are little-endian unless a parameter's
//! specification mandates MSB-first (documented per field). The completion
//! byte is stripped by the transport; response `unpack` sees only the bytes
//! after it.

mod command;
pub mod completion;

pub use command::{Command, NetFn, GET_PEF_CONFIG_PARAMS, GET_SDR};

use crate::error::Result;

/// A serializable request
///
/// Requests are immutable once constructed and consumed once by the exchange
/// engine.
pub trait IpmiRequest {
    /// The command identifier this request is addressed to
    fn command(&self) -> Command;

    /// Serialize to exact wire bytes (no padding beyond the wire format)
    fn pack(&self) -> Vec<u8>;
}

/// A deserializable response
///
/// Responses are output parameters: created empty via `Default`, populated in
/// place by `unpack`.
pub trait IpmiResponse: Default {
    /// Populate from raw reply bytes (after the completion-code byte)
    ///
    /// Must fail with a truncated-data error when fewer bytes are present
    /// than the minimum fixed fields require.
    fn unpack(&mut self, data: &[u8]) -> Result<()>;

    /// Command-specific completion-code meanings, consulted before the
    /// universal table. Empty for most commands.
    fn completion_codes() -> &'static [(u8, &'static str)] {
        &[]
    }
}
