//! Wire primitives
//!
//! Fixed-width pack/unpack helpers operating on byte buffers at explicit
//! offsets. Multi-byte fields are little-endian on the IPMI wire unless a
//! specific parameter's specification mandates MSB-first; the endianness of
//! every call site is explicit in the function name.
//!
//! Pack helpers assume the caller sized the buffer for the fields it packs
//! (requests allocate their exact wire length up front). Unpack helpers never
//! trust the buffer: every read is bounds-checked and fails with
//! [`IpmiError::Truncated`] rather than reading past the end.

use crate::error::{IpmiError, Result};

// =============================================================================
// Pack
// =============================================================================

/// Write a u8 at `offset`.
pub fn pack_u8(value: u8, buf: &mut [u8], offset: usize) {
    buf[offset] = value;
}

/// Write a u16 at `offset`, least-significant byte first.
pub fn pack_u16_le(value: u16, buf: &mut [u8], offset: usize) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

/// Write a u16 at `offset`, most-significant byte first.
///
/// Only for fields whose parameter specification mandates MSB-first.
pub fn pack_u16_be(value: u16, buf: &mut [u8], offset: usize) {
    buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

// =============================================================================
// Unpack
// =============================================================================

/// Check that `buf` holds at least `needed` bytes starting at `offset`.
fn ensure(buf: &[u8], offset: usize, needed: usize) -> Result<()> {
    let end = offset
        .checked_add(needed)
        .ok_or(IpmiError::Truncated {
            needed: usize::MAX,
            got: buf.len(),
        })?;
    if end > buf.len() {
        return Err(IpmiError::Truncated {
            needed: end,
            got: buf.len(),
        });
    }
    Ok(())
}

/// Read a u8 at `offset`; returns the value and the next offset.
pub fn unpack_u8(buf: &[u8], offset: usize) -> Result<(u8, usize)> {
    ensure(buf, offset, 1)?;
    Ok((buf[offset], offset + 1))
}

/// Read a little-endian u16 at `offset`; returns the value and the next offset.
pub fn unpack_u16_le(buf: &[u8], offset: usize) -> Result<(u16, usize)> {
    ensure(buf, offset, 2)?;
    let value = u16::from_le_bytes([buf[offset], buf[offset + 1]]);
    Ok((value, offset + 2))
}

/// Read a big-endian u16 at `offset`; returns the value and the next offset.
pub fn unpack_u16_be(buf: &[u8], offset: usize) -> Result<(u16, usize)> {
    ensure(buf, offset, 2)?;
    let value = u16::from_be_bytes([buf[offset], buf[offset + 1]]);
    Ok((value, offset + 2))
}

/// Extract `len` bytes starting at `offset`; returns the bytes and the next
/// offset. Fails when `offset + len` exceeds the buffer.
pub fn unpack_bytes(buf: &[u8], offset: usize, len: usize) -> Result<(Vec<u8>, usize)> {
    ensure(buf, offset, len)?;
    Ok((buf[offset..offset + len].to_vec(), offset + len))
}
