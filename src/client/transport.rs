//! Transport boundary
//!
//! The engine talks to the controller through a single synchronous primitive:
//! send one framed message, receive one framed reply. One exchange is in
//! flight per channel at any time; retry and timeout policy live here, never
//! in the engine.
//!
//! ## Frame Format (TCP transport)
//! ```text
//! request:  ┌──────────┬──────────┬──────────┬──────────────┐
//!           │ NetFn(1) │ Cmd (1)  │ Len (2)  │    Data      │
//!           └──────────┴──────────┴──────────┴──────────────┘
//! reply:    ┌──────────┬──────────┬─────────────────────────┐
//!           │ CC (1)   │ Len (2)  │         Data            │
//!           └──────────┴──────────┴─────────────────────────┘
//! ```
//! Length fields are big-endian per network convention; everything inside
//! `Data` is the engine's business.

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::{BufMut, BytesMut};

use crate::config::ClientConfig;
use crate::error::{IpmiError, Result};
use crate::message::Command;

/// Maximum data bytes one frame can carry (bounded by the u16 length field)
pub const MAX_FRAME_DATA: usize = u16::MAX as usize;

/// Request frame header size: netfn (1) + cmd (1) + length (2)
pub const REQUEST_HEADER_SIZE: usize = 4;

/// Reply frame header size: completion code (1) + length (2)
pub const REPLY_HEADER_SIZE: usize = 3;

/// The transport collaborator boundary
///
/// Implementations own the channel and its mutual-exclusion discipline; the
/// `&mut self` receiver makes one-in-flight the default for any owned
/// channel. Channel failures and timeouts are propagated unchanged as
/// transport-level errors.
pub trait Transport {
    /// Send one framed message, receive one framed reply
    ///
    /// Returns the completion code and the reply bytes that follow it.
    fn send(&mut self, command: Command, data: &[u8]) -> Result<(u8, Vec<u8>)>;
}

/// Framed TCP transport to a single controller
pub struct TcpTransport {
    /// Stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// Stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    /// Connect to the controller named by the config
    ///
    /// Sets up buffered I/O and configures timeouts.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let addr = config
            .addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| IpmiError::Transport(format!("cannot resolve {}", config.addr)))?;

        let stream =
            TcpStream::connect_timeout(&addr, Duration::from_millis(config.connect_timeout_ms))?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to controller at {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, command: Command, data: &[u8]) -> Result<(u8, Vec<u8>)> {
        if data.len() > MAX_FRAME_DATA {
            return Err(IpmiError::Transport(format!(
                "request payload too large: {} bytes",
                data.len()
            )));
        }

        // Build and send the request frame
        let mut frame = BytesMut::with_capacity(REQUEST_HEADER_SIZE + data.len());
        frame.put_u8(command.netfn as u8);
        frame.put_u8(command.code);
        frame.put_u16(data.len() as u16);
        frame.put_slice(data);

        self.writer.write_all(&frame)?;
        self.writer.flush()?;

        tracing::trace!(
            "Sent {:?}/{:#04x} ({} data bytes) to {}",
            command.netfn,
            command.code,
            data.len(),
            self.peer_addr
        );

        // Read the reply header
        let mut header = [0u8; REPLY_HEADER_SIZE];
        self.reader.read_exact(&mut header)?;

        let completion = header[0];
        let len = u16::from_be_bytes([header[1], header[2]]) as usize;

        // Read the reply payload
        let mut payload = vec![0u8; len];
        if len > 0 {
            self.reader.read_exact(&mut payload)?;
        }

        tracing::trace!(
            "Received completion {:#04x} ({} data bytes) from {}",
            completion,
            len,
            self.peer_addr
        );

        Ok((completion, payload))
    }
}
