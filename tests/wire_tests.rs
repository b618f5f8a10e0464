//! Wire Primitive Tests
//!
//! Round-trip and truncation-safety tests for the fixed-width pack/unpack
//! helpers.

use ipmikit::wire::{
    pack_u16_be, pack_u16_le, pack_u8, unpack_bytes, unpack_u16_be, unpack_u16_le, unpack_u8,
};
use ipmikit::IpmiError;

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_u8() {
    for value in [0x00u8, 0x01, 0x7F, 0x80, 0xFF] {
        let mut buf = [0u8; 1];
        pack_u8(value, &mut buf, 0);
        let (decoded, next) = unpack_u8(&buf, 0).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(next, 1);
    }
}

#[test]
fn test_round_trip_u16_le() {
    for value in [0x0000u16, 0x0001, 0x1234, 0xFF00, 0xFFFF] {
        let mut buf = [0u8; 2];
        pack_u16_le(value, &mut buf, 0);
        let (decoded, next) = unpack_u16_le(&buf, 0).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(next, 2);
    }
}

#[test]
fn test_round_trip_u16_be() {
    for value in [0x0000u16, 0x0001, 0x1234, 0x00FF, 0xFFFF] {
        let mut buf = [0u8; 2];
        pack_u16_be(value, &mut buf, 0);
        let (decoded, next) = unpack_u16_be(&buf, 0).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(next, 2);
    }
}

#[test]
fn test_round_trip_at_offset() {
    let mut buf = [0u8; 6];
    pack_u16_le(0xBEEF, &mut buf, 2);
    pack_u8(0x42, &mut buf, 4);

    let (word, next) = unpack_u16_le(&buf, 2).unwrap();
    assert_eq!(word, 0xBEEF);
    let (byte, _) = unpack_u8(&buf, next).unwrap();
    assert_eq!(byte, 0x42);
}

#[test]
fn test_endianness_on_the_wire() {
    let mut buf = [0u8; 2];
    pack_u16_le(0x1234, &mut buf, 0);
    assert_eq!(buf, [0x34, 0x12]);

    pack_u16_be(0x1234, &mut buf, 0);
    assert_eq!(buf, [0x12, 0x34]);
}

#[test]
fn test_unpack_bytes() {
    let buf = [1u8, 2, 3, 4, 5];
    let (bytes, next) = unpack_bytes(&buf, 1, 3).unwrap();
    assert_eq!(bytes, vec![2, 3, 4]);
    assert_eq!(next, 4);
}

#[test]
fn test_unpack_bytes_empty() {
    let buf = [1u8, 2];
    let (bytes, next) = unpack_bytes(&buf, 2, 0).unwrap();
    assert!(bytes.is_empty());
    assert_eq!(next, 2);
}

// =============================================================================
// Truncation Safety Tests
// =============================================================================

#[test]
fn test_unpack_u8_truncated() {
    let buf: [u8; 0] = [];
    let err = unpack_u8(&buf, 0).unwrap_err();
    assert!(matches!(err, IpmiError::Truncated { needed: 1, got: 0 }));
}

#[test]
fn test_unpack_u16_truncated() {
    let buf = [0xAAu8];
    assert!(matches!(
        unpack_u16_le(&buf, 0),
        Err(IpmiError::Truncated { .. })
    ));
    assert!(matches!(
        unpack_u16_be(&buf, 0),
        Err(IpmiError::Truncated { .. })
    ));
}

#[test]
fn test_unpack_past_end_of_buffer() {
    let buf = [1u8, 2, 3];
    assert!(matches!(
        unpack_u8(&buf, 3),
        Err(IpmiError::Truncated { .. })
    ));
    assert!(matches!(
        unpack_u16_le(&buf, 2),
        Err(IpmiError::Truncated { .. })
    ));
}

#[test]
fn test_unpack_bytes_truncated() {
    let buf = [1u8, 2, 3];
    let err = unpack_bytes(&buf, 1, 3).unwrap_err();
    assert!(matches!(err, IpmiError::Truncated { needed: 4, got: 3 }));
}

#[test]
fn test_unpack_bytes_offset_overflow() {
    // offset + len overflowing usize must fail, not wrap around
    let buf = [1u8, 2, 3];
    assert!(matches!(
        unpack_bytes(&buf, usize::MAX, 2),
        Err(IpmiError::Truncated { .. })
    ));
}
