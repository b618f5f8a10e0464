//! SDR record parsing
//!
//! Walk-external parser turning raw record bytes into a typed structure:
//! a common 5-byte header followed by a type-specific body. Body layouts
//! follow IPMI §43; record types this parser does not model are carried
//! with their raw bytes only.

use crate::error::{IpmiError, Result};
use crate::wire;

/// SDR header size: record id (2) + version (1) + type (1) + data length (1)
pub const HEADER_SIZE: usize = 5;

/// SDR record types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdrRecordType {
    /// Full sensor record (0x01)
    FullSensor,

    /// Compact sensor record (0x02)
    CompactSensor,

    /// Event-only record (0x03)
    EventOnly,

    /// FRU device locator record (0x11)
    FruDeviceLocator,

    /// Management controller device locator record (0x12)
    McDeviceLocator,

    /// Any other record type, carried raw
    Other(u8),
}

impl SdrRecordType {
    pub fn from_byte(b: u8) -> Self {
        match b {
            0x01 => SdrRecordType::FullSensor,
            0x02 => SdrRecordType::CompactSensor,
            0x03 => SdrRecordType::EventOnly,
            0x11 => SdrRecordType::FruDeviceLocator,
            0x12 => SdrRecordType::McDeviceLocator,
            other => SdrRecordType::Other(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            SdrRecordType::FullSensor => 0x01,
            SdrRecordType::CompactSensor => 0x02,
            SdrRecordType::EventOnly => 0x03,
            SdrRecordType::FruDeviceLocator => 0x11,
            SdrRecordType::McDeviceLocator => 0x12,
            SdrRecordType::Other(other) => other,
        }
    }
}

/// Common record header
#[derive(Debug, Clone)]
pub struct SdrHeader {
    /// Record id, little-endian on the wire
    pub record_id: u16,

    /// SDR version (0x51 for IPMI v2.0 records)
    pub sdr_version: u8,

    /// Record type
    pub record_type: SdrRecordType,

    /// Number of body bytes following the header
    pub data_len: u8,
}

/// Type-specific record body
///
/// Only the fields the presentation layer needs are decoded; the full body
/// stays available in [`SdrRecord::raw`].
#[derive(Debug, Clone)]
pub enum SdrBody {
    FullSensor {
        sensor_number: u8,
        entity_id: u8,
        entity_instance: u8,
        sensor_type: u8,
        name: String,
    },
    CompactSensor {
        sensor_number: u8,
        entity_id: u8,
        entity_instance: u8,
        sensor_type: u8,
        name: String,
    },
    EventOnly {
        sensor_number: u8,
        sensor_type: u8,
        name: String,
    },
    FruDeviceLocator {
        device_access_address: u8,
        fru_device_id: u8,
        name: String,
    },
    McDeviceLocator {
        device_slave_address: u8,
        channel: u8,
        name: String,
    },
    Raw,
}

/// One parsed repository record
///
/// Ownership transfers fully to the caller once appended to a walk result.
#[derive(Debug, Clone)]
pub struct SdrRecord {
    /// Record id of the record that follows this one (`0xFFFF` = none)
    pub next_record_id: u16,

    pub header: SdrHeader,
    pub body: SdrBody,

    /// Complete raw record bytes, header included
    pub raw: Vec<u8>,
}

impl SdrRecord {
    /// Parse raw record bytes
    pub fn parse(data: &[u8], next_record_id: u16) -> Result<Self> {
        let (record_id, offset) = wire::unpack_u16_le(data, 0)?;
        let (sdr_version, offset) = wire::unpack_u8(data, offset)?;
        let (type_byte, offset) = wire::unpack_u8(data, offset)?;
        let (data_len, _) = wire::unpack_u8(data, offset)?;

        let record_type = SdrRecordType::from_byte(type_byte);
        let header = SdrHeader {
            record_id,
            sdr_version,
            record_type,
            data_len,
        };

        let body = parse_body(record_type, data)?;

        Ok(Self {
            next_record_id,
            header,
            body,
            raw: data.to_vec(),
        })
    }

    /// Sensor or device name, where the record type carries one
    pub fn name(&self) -> Option<&str> {
        match &self.body {
            SdrBody::FullSensor { name, .. }
            | SdrBody::CompactSensor { name, .. }
            | SdrBody::EventOnly { name, .. }
            | SdrBody::FruDeviceLocator { name, .. }
            | SdrBody::McDeviceLocator { name, .. } => Some(name),
            SdrBody::Raw => None,
        }
    }
}

// Absolute byte offsets below include the 5-byte header, matching the
// "byte N" numbering of the IPMI record tables minus one.

fn parse_body(record_type: SdrRecordType, data: &[u8]) -> Result<SdrBody> {
    let body = match record_type {
        SdrRecordType::FullSensor => SdrBody::FullSensor {
            sensor_number: wire::unpack_u8(data, 7)?.0,
            entity_id: wire::unpack_u8(data, 8)?.0,
            entity_instance: wire::unpack_u8(data, 9)?.0,
            sensor_type: wire::unpack_u8(data, 12)?.0,
            name: unpack_id_string(data, 47)?,
        },
        SdrRecordType::CompactSensor => SdrBody::CompactSensor {
            sensor_number: wire::unpack_u8(data, 7)?.0,
            entity_id: wire::unpack_u8(data, 8)?.0,
            entity_instance: wire::unpack_u8(data, 9)?.0,
            sensor_type: wire::unpack_u8(data, 12)?.0,
            name: unpack_id_string(data, 31)?,
        },
        SdrRecordType::EventOnly => SdrBody::EventOnly {
            sensor_number: wire::unpack_u8(data, 7)?.0,
            sensor_type: wire::unpack_u8(data, 10)?.0,
            name: unpack_id_string(data, 16)?,
        },
        SdrRecordType::FruDeviceLocator => SdrBody::FruDeviceLocator {
            device_access_address: wire::unpack_u8(data, 5)?.0,
            fru_device_id: wire::unpack_u8(data, 6)?.0,
            name: unpack_id_string(data, 15)?,
        },
        SdrRecordType::McDeviceLocator => SdrBody::McDeviceLocator {
            device_slave_address: wire::unpack_u8(data, 5)?.0,
            channel: wire::unpack_u8(data, 6)?.0,
            name: unpack_id_string(data, 15)?,
        },
        SdrRecordType::Other(_) => SdrBody::Raw,
    };
    Ok(body)
}

/// Decode an ID string: a type/length byte ([4:0] length) followed by the
/// string bytes. Non-ASCII encodings are decoded lossily.
fn unpack_id_string(data: &[u8], offset: usize) -> Result<String> {
    let (type_len, offset) = wire::unpack_u8(data, offset)?;
    let len = (type_len & 0x1F) as usize;
    let (bytes, _) = wire::unpack_bytes(data, offset, len).map_err(|_| {
        IpmiError::Malformed(format!(
            "ID string declares {} bytes but record ends early",
            len
        ))
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
