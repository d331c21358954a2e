// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use pdcp_tx_rs::{
    cfg::{
        config::{BearerConfig, MaxCount, SecurityConfig},
        enums::{BearerKind, CipherAlgo, Direction, DiscardTimer, IntegAlgo, RlcMode},
    },
    entity::{collaborators::LocalTimerService, tx::PdcpTxEntity},
};

use crate::unit_tests::fakes::FakeCollaborators;

fn am_drb_bearer() -> BearerConfig {
    BearerConfig {
        sn_size: 12,
        rlc_mode: RlcMode::Am,
        bearer_kind: BearerKind::Drb,
        direction: Direction::Downlink,
        discard_timer: DiscardTimer::Ms1500,
        status_report_required: false,
        max_count: MaxCount { notify: 1000, hard: 2000 },
        lcid: 1,
    }
}

fn plain_security() -> SecurityConfig {
    SecurityConfig {
        integ_algo: IntegAlgo::Nia0,
        cipher_algo: CipherAlgo::Nea0,
        integrity_enabled: false,
        ciphering_enabled: false,
        k_rrc_int: [0; 16],
        k_rrc_enc: [0; 16],
        k_up_int: [0; 16],
        k_up_enc: [0; 16],
    }
}

/// Drives `handle_status_report` twice through the public `PdcpTxEntity`
/// API to land on the exact discard-map shape of spec.md §8 scenario 5
/// ({3,4,5,7,9}) before applying the literal FMC=5/bitmap report.
#[tokio::test(flavor = "current_thread")]
async fn scenario_5_prune_via_entity_api() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let fakes = FakeCollaborators::default();
            let entity = PdcpTxEntity::new(
                am_drb_bearer(),
                plain_security(),
                Box::new(fakes.clone()),
                Box::new(fakes.clone()),
                Box::new(fakes.clone()),
                Box::new(LocalTimerService),
            )
            .unwrap();

            for _ in 0..10 {
                entity.handle_sdu(&[0xAB]);
            }
            assert_eq!(entity.discard_len(), 10);

            // FMC=3 prunes {0,1,2}; bitmap 0x28 marks COUNT 6 and COUNT 8 as
            // received, leaving exactly {3,4,5,7,9}.
            let mut setup_report = vec![0x00, 0x00, 0x00, 0x00, 0x03];
            setup_report.push(0x28);
            entity.handle_status_report(&setup_report);
            assert_eq!(entity.discard_len(), 5);

            fakes.0.borrow_mut().discarded.clear();

            // The literal scenario report: FMC=5, bitmap 0b10100000.
            let report = [0x00, 0x00, 0x00, 0x00, 0x05, 0b1010_0000];
            entity.handle_status_report(&report);

            // {3,4} are pruned by FMC; COUNT 6 and 8 are bitmap-acked but
            // already absent, so no further discard notification fires for
            // them. {5,7,9} survive.
            let rec = fakes.0.borrow();
            assert_eq!(rec.discarded, vec![3, 4]);
            drop(rec);
            assert_eq!(entity.discard_len(), 3);
        })
        .await;
}
