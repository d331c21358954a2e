// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Composes `header ‖ ciphertext ‖ MAC-I` per TS 38.323 §5.8/§5.9
//! (spec.md §4.3).

use crate::{
    cfg::{
        config::SecurityConfig,
        enums::{BearerKind, Direction},
    },
    security::algorithms::{CipherAlgoImpl, CipheringAlgorithm, CryptoInput, IntegAlgoImpl, IntegrityAlgorithm},
};

/// Protects one SDU into a wire-ready PDU body (everything after the
/// header is already serialised). The caller prepends `header` bytes.
///
/// 1. If integrity is enabled, computes MAC-I over `header ‖ sdu`.
/// 2. Builds `plaintext = sdu ‖ mac_i?`, appending MAC-I when the bearer is
///    an SRB, or a DRB with integrity enabled (spec.md §4.3 step 2).
/// 3. Ciphers `plaintext` if ciphering is enabled.
pub fn protect(
    sec: &SecurityConfig,
    bearer_kind: BearerKind,
    direction: Direction,
    header: &[u8],
    sdu: &[u8],
    count: u32,
    bearer_id: u8,
) -> Vec<u8> {
    let (integ_key, cipher_key) = sec.keys_for(bearer_kind);
    let integ_input = CryptoInput { key: integ_key, count, bearer_id, direction };
    let cipher_input = CryptoInput { key: cipher_key, count, bearer_id, direction };

    let mut message = Vec::with_capacity(header.len() + sdu.len());
    message.extend_from_slice(header);
    message.extend_from_slice(sdu);

    let mac_i = if sec.integrity_enabled {
        let algo: IntegAlgoImpl = sec.integ_algo.into();
        Some(algo.compute_mac(&integ_input, &message))
    } else {
        None
    };

    let append_mac = matches!(bearer_kind, BearerKind::Srb) || (sec.integrity_enabled && matches!(bearer_kind, BearerKind::Drb));

    let mut plaintext = Vec::with_capacity(sdu.len() + 4);
    plaintext.extend_from_slice(sdu);
    if append_mac {
        plaintext.extend_from_slice(&mac_i.unwrap_or([0; 4]));
    }

    if sec.ciphering_enabled {
        let algo: CipherAlgoImpl = sec.cipher_algo.into();
        algo.apply_keystream(&cipher_input, &plaintext)
    } else {
        plaintext
    }
}
