// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Per-entity counters (spec.md §4's "Metrics & logging hooks" component).
//!
//! The entity runs single-threaded (spec.md §5), so these are plain
//! counters updated in place rather than atomics.

/// Countable events for one PDCP TX entity's lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Number of SDUs accepted from the upper layer.
    pub sdus_in: u64,
    /// Total bytes across all accepted SDUs.
    pub bytes_in: u64,
    /// Number of protected PDUs handed down to the lower layer.
    pub pdus_out: u64,
    /// Number of discard-timer expiries that fired.
    pub discard_timeouts: u64,
    /// Number of status reports received and processed.
    pub status_reports_rx: u64,
    /// Number of status reports compiled and sent.
    pub status_reports_tx: u64,
    /// Number of SDUs dropped because the entity was already hard-stopped.
    pub sdus_dropped_hard_stopped: u64,
    /// Number of SDUs dropped due to a configuration error.
    pub sdus_dropped_config_error: u64,
}

impl Metrics {
    pub fn record_sdu(&mut self, len: usize) {
        self.sdus_in += 1;
        self.bytes_in += len as u64;
    }
}
