//! Completion codes
//!
//! Every exchange returns one status byte; `0x00` is success. Non-zero codes
//! are either universal (table below, IPMI Table 5-2 subset) or registered
//! per-command via [`IpmiResponse::completion_codes`](super::IpmiResponse).
//! Resolution order is command-specific table first, then universal table,
//! then a generic unknown-code message.

/// Universal success code
pub const CC_OK: u8 = 0x00;

/// Universal completion codes and their meanings
const UNIVERSAL: &[(u8, &str)] = &[
    (0xC0, "node busy"),
    (0xC1, "invalid command"),
    (0xC2, "command invalid for given LUN"),
    (0xC3, "timeout while processing command"),
    (0xC4, "out of space"),
    (0xC5, "reservation canceled or invalid reservation ID"),
    (0xC6, "request data truncated"),
    (0xC7, "request data length invalid"),
    (0xC9, "parameter out of range"),
    (0xCA, "cannot return number of requested data bytes"),
    (0xCB, "requested sensor, data, or record not present"),
    (0xCC, "invalid data field in request"),
    (0xD4, "insufficient privilege level"),
    (0xD5, "command not supported in present state"),
    (0xFF, "unspecified error"),
];

/// Look up a code in the universal table
pub fn describe(code: u8) -> Option<&'static str> {
    UNIVERSAL
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, msg)| *msg)
}

/// Resolve a non-zero completion code to a message
///
/// `command_codes` is the response type's command-specific table; it wins
/// over the universal table. Unknown codes resolve to a generic message
/// rather than failing.
pub fn resolve(code: u8, command_codes: &[(u8, &'static str)]) -> String {
    command_codes
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, msg)| (*msg).to_string())
        .or_else(|| describe(code).map(str::to_string))
        .unwrap_or_else(|| "unknown completion code".to_string())
}
