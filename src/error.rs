// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Leaf error types for the PDCP transmit entity.
//!
//! These are the recoverable, "log and drop" conditions of TS 38.323 §5;
//! they never cross the API boundary as a hard failure, they are recorded
//! via `tracing` and folded into a no-op by the caller.

use thiserror::Error;

/// Configuration or per-SDU condition that causes `handle_sdu` to drop the
/// SDU without advancing `TX_NEXT`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `sn_size` is neither 12 nor 18.
    #[error("unsupported sn_size: {0} bits")]
    InvalidSnSize(u8),

    /// An SRB was configured with an 18-bit sequence number (invariant 6).
    #[error("SRB bearer cannot use an 18-bit sequence number")]
    SrbWith18BitSn,

    /// `max_count.notify` is greater than `max_count.hard`.
    #[error("max_count.notify ({notify}) must be <= max_count.hard ({hard})")]
    ThresholdOrder { notify: u32, hard: u32 },
}

/// A malformed or unrecognised incoming control PDU (status report).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlPduError {
    /// Fewer bytes than the fixed D/C + CPT + reserved + FMC fields.
    #[error("control PDU truncated: need at least {need} bytes, got {got}")]
    Truncated { need: usize, got: usize },

    /// The D/C bit did not indicate a control PDU.
    #[error("D/C bit indicates a data PDU, not a control PDU")]
    NotControl,

    /// The CPT field did not indicate a status report.
    #[error("unrecognised control PDU type: {0:#05b}")]
    UnknownCpt(u8),

    /// The 4 reserved bits following CPT were non-zero.
    #[error("non-zero reserved bits in status report header: {0:#06b}")]
    ReservedBitsSet(u8),
}
