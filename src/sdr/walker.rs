//! SDR repository walker
//!
//! The repository is a controller-maintained singly linked list: each
//! response names the next record id, and `0xFFFF` terminates the chain.
//! The walk is modeled as an explicit state machine rather than a loop with
//! embedded control flow, so the termination transition always runs after
//! the current record is processed. A record whose "next" field is the
//! sentinel is still included, even when the filter drops it.
//!
//! There is no safe way to resume a walk mid-chain after an error (cursor
//! semantics are controller-defined), so the first failure aborts and the
//! partial result is discarded.

use crate::client::{Client, Transport};
use crate::error::Result;
use crate::sdr::record::{SdrRecord, SdrRecordType};

/// Cursor value addressing the first record in the repository
pub const FIRST_RECORD_ID: u16 = 0x0000;

/// Sentinel "next record id" marking the end of the repository
///
/// Never a valid real record id.
pub const LAST_RECORD_ID: u16 = 0xFFFF;

/// Walk states
enum WalkState {
    /// One record remains to be fetched at `cursor`
    AwaitingRecord { cursor: u16 },

    /// The sentinel was observed; the walk is complete
    Done,
}

impl WalkState {
    /// Transition on the "next record id" carried by the current response
    fn advance(next_record_id: u16) -> Self {
        if next_record_id == LAST_RECORD_ID {
            WalkState::Done
        } else {
            WalkState::AwaitingRecord {
                cursor: next_record_id,
            }
        }
    }
}

/// Enumerate the repository, filtered by record type
///
/// `None` accepts all record types; matching records are returned in
/// repository order.
pub fn walk<T: Transport>(
    client: &mut Client<T>,
    filter: Option<SdrRecordType>,
) -> Result<Vec<SdrRecord>> {
    let mut records = Vec::new();
    let mut state = WalkState::AwaitingRecord {
        cursor: FIRST_RECORD_ID,
    };

    while let WalkState::AwaitingRecord { cursor } = state {
        let response = client.get_sdr(cursor)?;

        let record = SdrRecord::parse(&response.data, response.next_record_id)?;
        tracing::trace!(
            "Fetched SDR record {:#06x} (type {:#04x}), next {:#06x}",
            record.header.record_id,
            record.header.record_type.to_byte(),
            response.next_record_id
        );

        if filter.map_or(true, |wanted| record.header.record_type == wanted) {
            records.push(record);
        }

        state = WalkState::advance(response.next_record_id);
    }

    tracing::debug!("SDR walk complete: {} records returned", records.len());
    Ok(records)
}
