//! The PDCP transmit entity: state, discard-timer map, collaborator
//! contracts, and the entry points the upper/lower layers drive.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Collaborator traits (`timers`, `upper_cn`, `lower_dn`, `status_provider`)
/// and the default tokio-backed timer service (spec.md §4.7).
pub mod collaborators;
/// The ordered COUNT → (cached PDU, timer) discard map (spec.md §3, §4.4).
pub mod discard;
/// `TX_NEXT` plus the one-shot COUNT-threshold latches (spec.md §3).
pub mod state;
/// `PdcpTxEntity`: construction and the four entry points (spec.md §4).
pub mod tx;

pub use tx::PdcpTxEntity;
