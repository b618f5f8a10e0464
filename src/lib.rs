//! # ipmikit
//!
//! A client-side IPMI protocol engine:
//! - Typed binary command codec (pack/unpack at explicit offsets)
//! - Completion-code-aware exchange engine
//! - Sentinel-terminated SDR repository walker
//! - Count-gated PEF configuration retriever
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI / Presentation                      │
//! └──────┬───────────────────┬─────────────────────┬────────────┘
//!        │                   │                     │
//!        ▼                   ▼                     ▼
//! ┌─────────────┐    ┌──────────────┐     ┌────────────────┐
//! │ Single      │    │ SDR          │     │ PEF            │
//! │ Exchange    │    │ Walker       │     │ Retriever      │
//! └──────┬──────┘    └──────┬───────┘     └───────┬────────┘
//!        │                  │                     │
//!        └──────────────────┼─────────────────────┘
//!                           ▼
//!                 ┌──────────────────┐
//!                 │ Client::exchange │
//!                 └────────┬─────────┘
//!                          ▼
//!                 ┌──────────────────┐
//!                 │ Transport        │  one channel, one exchange
//!                 │ (TCP / mock)     │  in flight at a time
//!                 └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wire;
pub mod message;
pub mod client;
pub mod sdr;
pub mod pef;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::{Client, TcpTransport, Transport};
pub use config::ClientConfig;
pub use error::{IpmiError, Result};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ipmikit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
