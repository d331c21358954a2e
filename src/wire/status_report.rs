// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The PDCP status-report control PDU (TS 38.323 §6.2.3.1).
//!
//! ```text
//! [0|CPT=000|0000][FMC: 32 bits][bitmap: 0..N bytes]
//! ```

use bytes::Bytes;
use zerocopy::{BigEndian, FromBytes, Immutable, KnownLayout, U32};

use crate::error::ControlPduError;

/// Bit 7 of byte 0: must be 0 for a control PDU (1 would mean data PDU).
const DC_BIT: u8 = 0b1000_0000;
/// Bits 6:4 of byte 0: control-PDU type; `000` is *status report*.
const CPT_MASK: u8 = 0b0111_0000;
const CPT_STATUS_REPORT: u8 = 0b0000_0000;
/// Bits 3:0 of byte 0: reserved, must be zero.
const RESERVED_MASK: u8 = 0b0000_1111;

const FIXED_HEADER_LEN: usize = 5;

/// The fixed-size prefix of a status-report control PDU, read zero-copy;
/// the trailing bitmap is variable-length and handled separately.
#[repr(C)]
#[derive(Debug, FromBytes, KnownLayout, Immutable)]
struct FixedHeader {
    flags: u8,
    fmc: U32<BigEndian>,
}

/// A parsed status-report control PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// First missing COUNT.
    pub fmc: u32,
    pub bitmap: Bytes,
}

impl StatusReport {
    /// Parses a status report out of a chained byte sequence (spec.md
    /// §4.5). Any layout violation is returned as a [`ControlPduError`]; the
    /// caller is expected to log and drop on error without mutating state.
    pub fn parse(buf: &[u8]) -> Result<Self, ControlPduError> {
        if buf.len() < FIXED_HEADER_LEN {
            return Err(ControlPduError::Truncated { need: FIXED_HEADER_LEN, got: buf.len() });
        }
        let (hdr, rest) = FixedHeader::ref_from_prefix(buf)
            .map_err(|_| ControlPduError::Truncated { need: FIXED_HEADER_LEN, got: buf.len() })?;

        if hdr.flags & DC_BIT != 0 {
            return Err(ControlPduError::NotControl);
        }
        let cpt = (hdr.flags & CPT_MASK) >> 4;
        if cpt != CPT_STATUS_REPORT >> 4 {
            return Err(ControlPduError::UnknownCpt(cpt));
        }
        let reserved = hdr.flags & RESERVED_MASK;
        if reserved != 0 {
            return Err(ControlPduError::ReservedBitsSet(reserved));
        }

        let fmc = hdr.fmc.get();
        let bitmap = Bytes::copy_from_slice(rest);

        Ok(Self { fmc, bitmap })
    }

    /// Compiles a status report PDU from an FMC and a bitmap (spec.md §6).
    pub fn encode(fmc: u32, bitmap: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(FIXED_HEADER_LEN + bitmap.len());
        out.push(0);
        out.extend_from_slice(&fmc.to_be_bytes());
        out.extend_from_slice(bitmap);
        out
    }

    /// The COUNTs the bitmap marks as *received* (bit value 1), in ascending
    /// order. Per spec.md §4.5, bit *i* (0-indexed from the MSB of the first
    /// bitmap byte) corresponds to COUNT `(FMC + 1 + i) mod 2^32`: the
    /// working COUNT is incremented *before* each bit is evaluated (see
    /// the Open Question this implementation resolves literally).
    pub fn received_counts(&self) -> Vec<u32> {
        let mut out = Vec::new();
        let mut count = self.fmc.wrapping_add(1);
        for byte in &self.bitmap {
            for bit_pos in (0..8).rev() {
                let bit = (byte >> bit_pos) & 1;
                if bit == 1 {
                    out.push(count);
                }
                count = count.wrapping_add(1);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parses_scenario_5_status_report() {
        let buf = [0x00, 0x00, 0x00, 0x00, 0x05, 0b1010_0000];
        let report = StatusReport::parse(&buf).unwrap();
        assert_eq!(report.fmc, 5);
        assert_eq!(&report.bitmap[..], &[0b1010_0000]);
        assert_eq!(report.received_counts(), vec![6, 8]);
    }

    #[test]
    fn rejects_data_pdu_as_control() {
        let buf = [0x80, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(StatusReport::parse(&buf), Err(ControlPduError::NotControl));
    }

    #[test]
    fn rejects_non_zero_reserved_bits() {
        let buf = [0x01, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(
            StatusReport::parse(&buf),
            Err(ControlPduError::ReservedBitsSet(0b0001))
        );
    }

    #[test]
    fn rejects_unknown_cpt() {
        let buf = [0b0001_0000, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(StatusReport::parse(&buf), Err(ControlPduError::UnknownCpt(1)));
    }

    #[test]
    fn rejects_truncated_buffer() {
        assert_eq!(
            StatusReport::parse(&[0x00, 0x00]),
            Err(ControlPduError::Truncated { need: 5, got: 2 })
        );
    }

    #[test]
    fn round_trips_encode_parse() {
        let bitmap = [0b1111_0000, 0b0000_1111];
        let encoded = StatusReport::encode(42, &bitmap);
        let parsed = StatusReport::parse(&encoded).unwrap();
        assert_eq!(parsed.fmc, 42);
        assert_eq!(&parsed.bitmap[..], &bitmap);
    }
}
