//! SDR Module
//!
//! Sensor Data Record repository access: the Get SDR command codec, the
//! record parser, and the sentinel-terminated repository walker.

mod commands;
mod record;
mod walker;

pub use commands::{GetSdrRequest, GetSdrResponse, READ_ENTIRE_RECORD};
pub use record::{SdrBody, SdrHeader, SdrRecord, SdrRecordType, HEADER_SIZE};
pub use walker::{walk, FIRST_RECORD_ID, LAST_RECORD_ID};
