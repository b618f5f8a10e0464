//! Shared test helpers
//!
//! A scripted transport standing in for a controller: replies are queued up
//! front, every exchange is recorded for later assertions.

#![allow(dead_code)]

use std::collections::VecDeque;

use ipmikit::message::Command;
use ipmikit::{IpmiError, Result, Transport};

/// One scripted reply
enum Reply {
    /// Completion code + reply bytes
    Answer(u8, Vec<u8>),

    /// Transport-level failure
    TransportError(String),
}

/// A transport that replays scripted replies and records every exchange
pub struct MockTransport {
    replies: VecDeque<Reply>,

    /// Every (command, request data) handed to the transport, in order
    pub sent: Vec<(Command, Vec<u8>)>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: VecDeque::new(),
            sent: Vec::new(),
        }
    }

    /// Queue a reply with completion code 0x00
    pub fn reply_ok(&mut self, data: &[u8]) -> &mut Self {
        self.replies.push_back(Reply::Answer(0x00, data.to_vec()));
        self
    }

    /// Queue a reply with an explicit completion code
    pub fn reply(&mut self, completion: u8, data: &[u8]) -> &mut Self {
        self.replies
            .push_back(Reply::Answer(completion, data.to_vec()));
        self
    }

    /// Queue a transport-level failure
    pub fn fail(&mut self, message: &str) -> &mut Self {
        self.replies
            .push_back(Reply::TransportError(message.to_string()));
        self
    }

    /// Number of exchanges performed so far
    pub fn exchanges(&self) -> usize {
        self.sent.len()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, command: Command, data: &[u8]) -> Result<(u8, Vec<u8>)> {
        self.sent.push((command, data.to_vec()));
        match self.replies.pop_front() {
            Some(Reply::Answer(completion, reply)) => Ok((completion, reply)),
            Some(Reply::TransportError(message)) => Err(IpmiError::Transport(message)),
            None => Err(IpmiError::Transport(
                "no scripted reply for exchange".to_string(),
            )),
        }
    }
}

// =============================================================================
// Reply Builders
// =============================================================================

/// Build a Get SDR reply: next record id (LE) + a minimal record
///
/// The record is header-only (body length 0) so any record type parses.
pub fn sdr_reply(next_record_id: u16, record_id: u16, record_type: u8) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&next_record_id.to_le_bytes());
    data.extend_from_slice(&record_id.to_le_bytes());
    data.push(0x51); // SDR version
    data.push(record_type);
    data.push(0x00); // body length
    data
}

/// Build a Get PEF Configuration Parameters reply: revision + parameter data
pub fn pef_reply(param_data: &[u8]) -> Vec<u8> {
    let mut data = vec![0x11]; // parameter revision
    data.extend_from_slice(param_data);
    data
}
