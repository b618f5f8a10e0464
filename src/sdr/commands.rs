//! Get SDR command codec (IPMI 33.12)

use crate::error::{IpmiError, Result};
use crate::message::{Command, IpmiRequest, IpmiResponse, GET_SDR};
use crate::wire;

/// Sentinel for `bytes_to_read` meaning "read the entire record"
pub const READ_ENTIRE_RECORD: u8 = 0xFF;

/// Get SDR request
///
/// ```text
/// ┌────────────────────┬───────────────┬────────────┬─────────────────┐
/// │ Reservation ID (2) │ Record ID (2) │ Offset (1) │ Bytes to read(1)│
/// └────────────────────┴───────────────┴────────────┴─────────────────┘
/// ```
/// Both ids are little-endian. Whole-record reads need no reservation, so
/// the walker always sends reservation id 0.
#[derive(Debug, Clone)]
pub struct GetSdrRequest {
    pub reservation_id: u16,
    pub record_id: u16,
    pub offset: u8,
    pub bytes_to_read: u8,
}

impl GetSdrRequest {
    /// Request the entire record at `record_id`, no reservation
    pub fn whole_record(record_id: u16) -> Self {
        Self {
            reservation_id: 0,
            record_id,
            offset: 0,
            bytes_to_read: READ_ENTIRE_RECORD,
        }
    }
}

impl IpmiRequest for GetSdrRequest {
    fn command(&self) -> Command {
        GET_SDR
    }

    fn pack(&self) -> Vec<u8> {
        let mut msg = vec![0u8; 6];
        wire::pack_u16_le(self.reservation_id, &mut msg, 0);
        wire::pack_u16_le(self.record_id, &mut msg, 2);
        wire::pack_u8(self.offset, &mut msg, 4);
        wire::pack_u8(self.bytes_to_read, &mut msg, 5);
        msg
    }
}

/// Get SDR response
///
/// Two fixed bytes (next record id, little-endian) followed by the raw
/// record data.
#[derive(Debug, Clone, Default)]
pub struct GetSdrResponse {
    /// Record id of the next record in the repository; `0xFFFF` means this
    /// was the last one.
    pub next_record_id: u16,

    /// Raw record bytes (header + type-specific body)
    pub data: Vec<u8>,
}

impl IpmiResponse for GetSdrResponse {
    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        if data.len() < 2 {
            return Err(IpmiError::Truncated {
                needed: 2,
                got: data.len(),
            });
        }
        let (next, offset) = wire::unpack_u16_le(data, 0)?;
        self.next_record_id = next;
        let (record, _) = wire::unpack_bytes(data, offset, data.len() - offset)?;
        self.data = record;
        Ok(())
    }
}
