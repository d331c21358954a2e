// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! `PdcpTxEntity`: the four entry points driven by the upper/lower layers
//! (spec.md §4). Runs on a single-threaded `tokio::task::LocalSet`
//! (spec.md §5) so its internals are a plain `Rc<RefCell<..>>`, with no
//! internal locking needed.

use std::{cell::RefCell, rc::Rc};

use tracing::{error, warn};

use crate::{
    cfg::{
        config::{BearerConfig, SecurityConfig},
        enums::BearerKind,
    },
    entity::{
        collaborators::{LowerDataNotifier, StatusProvider, TimerService, TxPdu, UpperControlNotifier},
        discard::DiscardMap,
        state::TxState,
    },
    error::ConfigError,
    metrics::Metrics,
    security::pipeline,
    wire::{header::DataPduHeader, status_report::StatusReport},
};

struct Inner {
    config: BearerConfig,
    sec: SecurityConfig,
    state: TxState,
    discard: DiscardMap,
    metrics: Metrics,
    upper_cn: Box<dyn UpperControlNotifier>,
    lower_dn: Box<dyn LowerDataNotifier>,
    status_provider: Box<dyn StatusProvider>,
    timers: Box<dyn TimerService>,
}

impl Inner {
    fn emit_status_report(&mut self) {
        if !self.config.status_report_required {
            warn!("send_status_report called without status_report_required configured; no-op");
            return;
        }
        let pdu = self.status_provider.compile_status_report();
        self.lower_dn.on_new_control_pdu(pdu);
        self.metrics.status_reports_tx += 1;
    }

    fn on_discard_timeout(&mut self, count: u32) {
        if !self.discard.contains(count) {
            return;
        }
        self.lower_dn.on_discard_pdu(count);
        self.metrics.discard_timeouts += 1;
        // Erasing the entry must be the last action: it drops the timer
        // handle (and, transitively, the closure this call runs inside of
        // for the default `LocalTimerService`).
        self.discard.erase(count);
    }
}

/// One PDCP transmit entity for one radio bearer (spec.md §2).
#[derive(Clone)]
pub struct PdcpTxEntity(Rc<RefCell<Inner>>);

impl PdcpTxEntity {
    /// Constructs a new entity. Re-validates the invariants `Config::validate`
    /// already checks (invariant 6, threshold ordering) so a `PdcpTxEntity`
    /// can never exist in a state that violates them (spec.md §3).
    pub fn new(
        config: BearerConfig,
        sec: SecurityConfig,
        upper_cn: Box<dyn UpperControlNotifier>,
        lower_dn: Box<dyn LowerDataNotifier>,
        status_provider: Box<dyn StatusProvider>,
        timers: Box<dyn TimerService>,
    ) -> Result<Self, ConfigError> {
        if config.sn_size != 12 && config.sn_size != 18 {
            return Err(ConfigError::InvalidSnSize(config.sn_size));
        }
        if matches!(config.bearer_kind, BearerKind::Srb) && config.sn_size == 18 {
            return Err(ConfigError::SrbWith18BitSn);
        }
        if config.max_count.notify > config.max_count.hard {
            return Err(ConfigError::ThresholdOrder {
                notify: config.max_count.notify,
                hard: config.max_count.hard,
            });
        }

        Ok(Self(Rc::new(RefCell::new(Inner {
            config,
            sec,
            state: TxState::new(),
            discard: DiscardMap::new(),
            metrics: Metrics::default(),
            upper_cn,
            lower_dn,
            status_provider,
            timers,
        }))))
    }

    /// Accepts one SDU from the upper layer (spec.md §4.1).
    pub fn handle_sdu(&self, sdu: &[u8]) {
        let mut inner = self.0.borrow_mut();
        inner.metrics.record_sdu(sdu.len());

        if inner.state.tx_next >= inner.config.max_count.hard {
            if !inner.state.hard_stopped {
                error!(tx_next = inner.state.tx_next, "COUNT reached max_count.hard; latching");
                inner.upper_cn.on_protocol_failure();
                inner.state.hard_stopped = true;
            }
            inner.metrics.sdus_dropped_hard_stopped += 1;
            return;
        }

        if inner.state.tx_next >= inner.config.max_count.notify && !inner.state.notify_sent {
            warn!(tx_next = inner.state.tx_next, "COUNT crossed max_count.notify");
            inner.upper_cn.on_max_count_reached();
            inner.state.notify_sent = true;
        }

        let sn_size = inner.config.sn_size;
        let count = inner.state.tx_next;
        let sn = count % (1u32 << sn_size);

        let header = DataPduHeader { bearer_kind: inner.config.bearer_kind, sn_size, sn };
        let cap = DataPduHeader::wire_len(sn_size).unwrap_or(0) + sdu.len();
        let mut pdu_bytes = Vec::with_capacity(cap);
        if let Err(e) = header.encode_into(&mut pdu_bytes) {
            error!(error = %e, "dropping SDU: header encode failed");
            inner.metrics.sdus_dropped_config_error += 1;
            return;
        }

        let bearer_id = inner.config.bearer_id();
        let body = pipeline::protect(
            &inner.sec,
            inner.config.bearer_kind,
            inner.config.direction,
            &pdu_bytes,
            sdu,
            count,
            bearer_id,
        );
        pdu_bytes.extend_from_slice(&body);

        if let Some(duration) = inner.config.discard_timer.duration() {
            let cached = inner.config.is_am_drb().then(|| pdu_bytes.clone());
            let weak = Rc::downgrade(&self.0);
            let handle = inner.timers.arm(
                duration,
                Box::new(move || {
                    if let Some(rc) = weak.upgrade() {
                        rc.borrow_mut().on_discard_timeout(count);
                    }
                }),
            );
            inner.discard.insert(count, cached, handle);
        }

        let pdcp_count = matches!(inner.config.bearer_kind, BearerKind::Drb).then_some(count);
        inner.lower_dn.on_new_pdu(TxPdu { buf: pdu_bytes, pdcp_count });
        inner.metrics.pdus_out += 1;
        inner.state.tx_next += 1;
    }

    /// Parses and acts on an incoming status-report control PDU (spec.md
    /// §4.5). Malformed input is logged and leaves state unchanged.
    pub fn handle_status_report(&self, buf: &[u8]) {
        let mut inner = self.0.borrow_mut();
        let report = match StatusReport::parse(buf) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "dropping malformed status report");
                return;
            },
        };
        inner.metrics.status_reports_rx += 1;

        for count in inner.discard.erase_below(report.fmc) {
            inner.lower_dn.on_discard_pdu(count);
        }
        for count in report.received_counts() {
            if inner.discard.erase(count).is_some() {
                inner.lower_dn.on_discard_pdu(count);
            }
        }
    }

    /// Emits a locally compiled status report, if configured to do so
    /// (spec.md §4.6).
    pub fn send_status_report(&self) {
        self.0.borrow_mut().emit_status_report();
    }

    /// AM-DRB data recovery: optionally emits a status report, then
    /// re-delivers every cached PDU in ascending COUNT order (spec.md
    /// §4.6). Calling this on a non-AM-DRB entity is a programming error.
    pub fn data_recovery(&self) {
        let mut inner = self.0.borrow_mut();
        assert!(inner.config.is_am_drb(), "data_recovery called on a non-AM-DRB entity");

        if inner.config.status_report_required {
            inner.emit_status_report();
        }
        for (count, pdu) in inner.discard.cached_in_order() {
            inner.lower_dn.on_new_pdu(TxPdu { buf: pdu, pdcp_count: Some(count) });
        }
    }

    /// Cancels every live timer and drops the discard map (bearer teardown,
    /// spec.md §3, §5).
    pub fn teardown(&self) {
        self.0.borrow_mut().discard.clear();
    }

    pub fn tx_next(&self) -> u32 {
        self.0.borrow().state.tx_next
    }

    pub fn hard_stopped(&self) -> bool {
        self.0.borrow().state.hard_stopped
    }

    pub fn notify_sent(&self) -> bool {
        self.0.borrow().state.notify_sent
    }

    pub fn discard_len(&self) -> usize {
        self.0.borrow().discard.len()
    }

    pub fn metrics(&self) -> Metrics {
        self.0.borrow().metrics
    }
}
