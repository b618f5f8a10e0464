//! Command identifiers
//!
//! Every request/response pair is identified by a network function plus a
//! one-byte command code. Identifiers are opaque to the exchange engine and
//! stable for the session lifetime.

/// IPMI network function codes (request direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NetFn {
    /// Sensor/Event requests (PEF lives here)
    SensorEvent = 0x04,

    /// Application requests
    App = 0x06,

    /// Storage requests (SDR repository lives here)
    Storage = 0x0A,
}

/// A protocol command identifier: network function + command code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Network function the command belongs to
    pub netfn: NetFn,

    /// One-byte command code within the network function
    pub code: u8,
}

impl Command {
    pub const fn new(netfn: NetFn, code: u8) -> Self {
        Self { netfn, code }
    }
}

/// Get SDR (IPMI 33.12)
pub const GET_SDR: Command = Command::new(NetFn::Storage, 0x23);

/// Get PEF Configuration Parameters (IPMI 30.4)
pub const GET_PEF_CONFIG_PARAMS: Command = Command::new(NetFn::SensorEvent, 0x13);
