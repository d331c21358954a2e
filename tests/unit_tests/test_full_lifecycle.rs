// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use pdcp_tx_rs::{
    cfg::config::Config,
    entity::{collaborators::LocalTimerService, tx::PdcpTxEntity},
};

use crate::unit_tests::fakes::FakeCollaborators;

/// Loads a bearer from YAML (mirrors `Config::load_from_file` in production)
/// and drives an AM DRB entity through submit → data recovery → teardown.
#[tokio::test(flavor = "current_thread")]
async fn loaded_am_drb_survives_data_recovery_and_teardown() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let cfg = Config::load_from_file("tests/unit_tests/fixtures/am_drb_bearer.yaml").unwrap();
            assert!(cfg.bearer.is_am_drb());

            let fakes = FakeCollaborators::default();
            let entity = PdcpTxEntity::new(
                cfg.bearer,
                cfg.security,
                Box::new(fakes.clone()),
                Box::new(fakes.clone()),
                Box::new(fakes.clone()),
                Box::new(LocalTimerService),
            )
            .unwrap();

            entity.handle_sdu(&[0x10]);
            entity.handle_sdu(&[0x11]);
            assert_eq!(entity.tx_next(), 2);
            assert_eq!(entity.discard_len(), 2);

            fakes.0.borrow_mut().pdus.clear();
            entity.data_recovery();
            {
                let rec = fakes.0.borrow();
                // status_report_required=true in the fixture: one control
                // PDU first, then the two cached data PDUs in order.
                assert_eq!(rec.control_pdus.len(), 1);
                assert_eq!(rec.pdus.len(), 2);
                assert_eq!(rec.pdus[0].pdcp_count, Some(0));
                assert_eq!(rec.pdus[1].pdcp_count, Some(1));
            }
            assert_eq!(entity.tx_next(), 2, "data_recovery must not advance TX_NEXT");

            entity.teardown();
            assert_eq!(entity.discard_len(), 0);
        })
        .await;
}
