// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Capability-bundle collaborators the entity is wired to at construction
//! and never rebinds (spec.md §4.7, §9 "virtual-interface collaborators").

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// A protected PDU ready for the lower layer, with the COUNT attached for
/// DRBs only (spec.md §4.1 step 7: "pdcp_count = TX_NEXT if DRB else
/// absent").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxPdu {
    pub buf: Vec<u8>,
    pub pdcp_count: Option<u32>,
}

/// Upper-layer (RRC) control-plane notifications (spec.md §4.1, §4.7).
pub trait UpperControlNotifier {
    /// COUNT reached `max_count.hard`; fatal, latches the entity.
    fn on_protocol_failure(&self);
    /// COUNT crossed `max_count.notify`; soft, requests a rekey.
    fn on_max_count_reached(&self);
}

/// Lower-layer (RLC) delivery notifications (spec.md §4.7).
pub trait LowerDataNotifier {
    /// Delivers a protected data PDU downward.
    fn on_new_pdu(&self, pdu: TxPdu);
    /// Delivers a compiled status-report control PDU downward.
    fn on_new_control_pdu(&self, pdu: Vec<u8>);
    /// Informs RLC that it may give up on an unsent PDU for this COUNT.
    fn on_discard_pdu(&self, count: u32);
}

/// Produces the locally compiled status report (spec.md §4.6, §4.7).
pub trait StatusProvider {
    fn compile_status_report(&self) -> Vec<u8>;
}

/// A handle to a single armed discard timer; dropping or cancelling it
/// stops the callback from firing (spec.md §4.4, §9 "arena/owner for
/// timers").
#[derive(Debug, Clone)]
pub struct TimerHandle {
    cancel: CancellationToken,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Creates one-shot, millisecond-granularity timers (spec.md §4.7).
///
/// Implementations must schedule `on_fire` on the same logical executor the
/// entity itself runs on (spec.md §5); the default implementation uses
/// `tokio::task::spawn_local` so the callback can close over non-`Send`
/// entity state without any internal locking.
pub trait TimerService {
    fn arm(&self, duration: Duration, on_fire: Box<dyn FnOnce() + 'static>) -> TimerHandle;
}

/// Default [`TimerService`] for a single-threaded `tokio::task::LocalSet`
/// executor (spec.md §5): each armed timer is a cancellable task guarded by
/// its own `CancellationToken`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTimerService;

impl TimerService for LocalTimerService {
    fn arm(&self, duration: Duration, on_fire: Box<dyn FnOnce() + 'static>) -> TimerHandle {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::task::spawn_local(async move {
            tokio::select! {
                _ = child.cancelled() => {},
                _ = tokio::time::sleep(duration) => on_fire(),
            }
        });
        TimerHandle { cancel: token }
    }
}
