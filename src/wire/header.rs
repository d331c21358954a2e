// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The PDCP data-PDU header (TS 38.323 §6.2).
//!
//! ```text
//!  7   6   5   4   3   2   1   0      byte 0, 12-bit SN
//! +---+---+-----------------------+
//! |D/C|  reserved |   SN[11:8]    |
//! +---+---+-----------------------+
//! ```
//!
//! For an 18-bit SN the header grows to three bytes and only the low two
//! bits of byte 0 carry SN data (the rest is reserved and must be zero).

use core::fmt;

use crate::cfg::enums::BearerKind;

/// Bit 7 of byte 0: 1 for a DRB, 0 for an SRB (spec.md §4.2).
const DC_BIT: u8 = 0b1000_0000;
/// Lower nibble of byte 0 carrying SN[11:8] in the 12-bit layout.
const SN12_HI_MASK: u8 = 0b0000_1111;
/// Lower two bits of byte 0 carrying SN[17:16] in the 18-bit layout.
const SN18_HI_MASK: u8 = 0b0000_0011;

/// A decoded/encodable data-PDU header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPduHeader {
    pub bearer_kind: BearerKind,
    pub sn_size: u8,
    pub sn: u32,
}

/// Failure modes of [`DataPduHeader::encode`] / [`DataPduHeader::decode`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HeaderCodecError {
    #[error("unsupported sn_size: {0} bits")]
    UnsupportedSnSize(u8),

    #[error("sequence number {sn} does not fit in {sn_size} bits")]
    SnOutOfRange { sn: u32, sn_size: u8 },

    #[error("header buffer truncated: need {need} bytes, got {got}")]
    Truncated { need: usize, got: usize },

    #[error("18-bit sequence number header had its D/C bit clear (SRB cannot use 18-bit SN)")]
    SrbWith18BitSn,
}

impl DataPduHeader {
    /// Byte length of the header for a given `sn_size` (spec.md §4.2).
    pub fn wire_len(sn_size: u8) -> Result<usize, HeaderCodecError> {
        match sn_size {
            12 => Ok(2),
            18 => Ok(3),
            other => Err(HeaderCodecError::UnsupportedSnSize(other)),
        }
    }

    /// Serialises this header, appending to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), HeaderCodecError> {
        let dc = match self.bearer_kind {
            BearerKind::Drb => DC_BIT,
            BearerKind::Srb => 0,
        };
        match self.sn_size {
            12 => {
                if self.sn > 0xFFF {
                    return Err(HeaderCodecError::SnOutOfRange {
                        sn: self.sn,
                        sn_size: 12,
                    });
                }
                let b0 = dc | (((self.sn >> 8) as u8) & SN12_HI_MASK);
                let b1 = (self.sn & 0xFF) as u8;
                out.push(b0);
                out.push(b1);
                Ok(())
            },
            18 => {
                if matches!(self.bearer_kind, BearerKind::Srb) {
                    return Err(HeaderCodecError::SrbWith18BitSn);
                }
                if self.sn > 0x3_FFFF {
                    return Err(HeaderCodecError::SnOutOfRange {
                        sn: self.sn,
                        sn_size: 18,
                    });
                }
                let b0 = dc | (((self.sn >> 16) as u8) & SN18_HI_MASK);
                let b1 = ((self.sn >> 8) & 0xFF) as u8;
                let b2 = (self.sn & 0xFF) as u8;
                out.push(b0);
                out.push(b1);
                out.push(b2);
                Ok(())
            },
            other => Err(HeaderCodecError::UnsupportedSnSize(other)),
        }
    }

    /// Parses a header from the front of `buf`. `sn_size` must be supplied
    /// by the caller (it comes from the bearer's configuration, not the
    /// wire bytes) since the header carries no self-describing SN-size bit.
    pub fn decode(buf: &[u8], sn_size: u8) -> Result<Self, HeaderCodecError> {
        let need = Self::wire_len(sn_size)?;
        if buf.len() < need {
            return Err(HeaderCodecError::Truncated { need, got: buf.len() });
        }
        let b0 = buf[0];
        let bearer_kind = if b0 & DC_BIT != 0 { BearerKind::Drb } else { BearerKind::Srb };

        let sn = match sn_size {
            12 => ((b0 & SN12_HI_MASK) as u32) << 8 | buf[1] as u32,
            18 => {
                if matches!(bearer_kind, BearerKind::Srb) {
                    return Err(HeaderCodecError::SrbWith18BitSn);
                }
                ((b0 & SN18_HI_MASK) as u32) << 16 | (buf[1] as u32) << 8 | buf[2] as u32
            },
            other => return Err(HeaderCodecError::UnsupportedSnSize(other)),
        };

        Ok(Self { bearer_kind, sn_size, sn })
    }
}

impl fmt::Display for DataPduHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(sn={}/{} bits)", self.bearer_kind, self.sn, self.sn_size)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn encodes_drb_sn12_per_scenario_1() {
        let h = DataPduHeader { bearer_kind: BearerKind::Drb, sn_size: 12, sn: 0 };
        let mut out = Vec::new();
        h.encode_into(&mut out).unwrap();
        assert_eq!(out, vec![0x80, 0x00]);
    }

    #[test]
    fn encodes_drb_sn12_per_scenario_2() {
        let h = DataPduHeader { bearer_kind: BearerKind::Drb, sn_size: 12, sn: 5 };
        let mut out = Vec::new();
        h.encode_into(&mut out).unwrap();
        assert_eq!(out, vec![0x80, 0x05]);
    }

    #[test]
    fn round_trips_every_kind_and_sn_size() {
        for (kind, sn_size, sn) in [
            (BearerKind::Srb, 12u8, 0u32),
            (BearerKind::Srb, 12, 0xFFF),
            (BearerKind::Drb, 12, 0x0AB),
            (BearerKind::Drb, 18, 0x3_FFFF),
            (BearerKind::Drb, 18, 0x1_2345),
        ] {
            let h = DataPduHeader { bearer_kind: kind, sn_size, sn };
            let mut out = Vec::new();
            h.encode_into(&mut out).unwrap();
            let decoded = DataPduHeader::decode(&out, sn_size).unwrap();
            assert_eq!(decoded, h);
        }
    }

    #[test]
    fn rejects_srb_with_18_bit_sn_on_encode() {
        let h = DataPduHeader { bearer_kind: BearerKind::Srb, sn_size: 18, sn: 1 };
        let mut out = Vec::new();
        assert_eq!(h.encode_into(&mut out), Err(HeaderCodecError::SrbWith18BitSn));
    }

    #[test]
    fn rejects_truncated_buffer() {
        assert_eq!(
            DataPduHeader::decode(&[0x80], 12),
            Err(HeaderCodecError::Truncated { need: 2, got: 1 })
        );
    }

    #[test]
    fn sn18_layout_matches_wire_table() {
        let h = DataPduHeader { bearer_kind: BearerKind::Drb, sn_size: 18, sn: 0x3_FFFF };
        let mut out = Vec::new();
        h.encode_into(&mut out).unwrap();
        assert_eq!(out, vec![0b1000_0011, 0xFF, 0xFF]);
    }
}
