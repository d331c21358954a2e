// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Shared recording fakes for the collaborator traits, driven across the
//! scenario tests in this module.

use std::{cell::RefCell, rc::Rc};

use pdcp_tx_rs::entity::collaborators::{LowerDataNotifier, StatusProvider, TxPdu, UpperControlNotifier};

#[derive(Default)]
pub struct Recorder {
    pub protocol_failures: u32,
    pub max_count_reached: u32,
    pub pdus: Vec<TxPdu>,
    pub control_pdus: Vec<Vec<u8>>,
    pub discarded: Vec<u32>,
}

#[derive(Clone, Default)]
pub struct FakeCollaborators(pub Rc<RefCell<Recorder>>);

impl UpperControlNotifier for FakeCollaborators {
    fn on_protocol_failure(&self) {
        self.0.borrow_mut().protocol_failures += 1;
    }

    fn on_max_count_reached(&self) {
        self.0.borrow_mut().max_count_reached += 1;
    }
}

impl LowerDataNotifier for FakeCollaborators {
    fn on_new_pdu(&self, pdu: TxPdu) {
        self.0.borrow_mut().pdus.push(pdu);
    }

    fn on_new_control_pdu(&self, pdu: Vec<u8>) {
        self.0.borrow_mut().control_pdus.push(pdu);
    }

    fn on_discard_pdu(&self, count: u32) {
        self.0.borrow_mut().discarded.push(count);
    }
}

impl StatusProvider for FakeCollaborators {
    fn compile_status_report(&self) -> Vec<u8> {
        vec![0x00, 0, 0, 0, 0]
    }
}
