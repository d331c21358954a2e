// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    cfg::enums::{BearerKind, CipherAlgo, Direction, DiscardTimer, IntegAlgo, RlcMode},
    error::ConfigError,
};

/// A 128-bit key, as it arrives from the key-management layer (spec.md §1:
/// "no key derivation, keys arrive fully materialised").
pub type Key128 = [u8; 16];

/// The four key-domain secrets a bearer may draw from (spec.md §3
/// "Security configuration").
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SecurityConfig {
    #[serde(rename = "IntegAlgo")]
    pub integ_algo: IntegAlgo,
    #[serde(rename = "CipherAlgo")]
    pub cipher_algo: CipherAlgo,

    #[serde(rename = "IntegrityEnabled")]
    pub integrity_enabled: bool,
    #[serde(rename = "CipheringEnabled")]
    pub ciphering_enabled: bool,

    #[serde(rename = "KRrcInt", with = "hex_key")]
    pub k_rrc_int: Key128,
    #[serde(rename = "KRrcEnc", with = "hex_key")]
    pub k_rrc_enc: Key128,
    #[serde(rename = "KUpInt", with = "hex_key")]
    pub k_up_int: Key128,
    #[serde(rename = "KUpEnc", with = "hex_key")]
    pub k_up_enc: Key128,
}

impl SecurityConfig {
    /// Selects the `(integrity_key, ciphering_key)` pair for the given
    /// bearer kind (spec.md §4.3).
    pub fn keys_for(&self, kind: BearerKind) -> (&Key128, &Key128) {
        match kind {
            BearerKind::Srb => (&self.k_rrc_int, &self.k_rrc_enc),
            BearerKind::Drb => (&self.k_up_int, &self.k_up_enc),
        }
    }
}

/// COUNT wrap-around thresholds (spec.md §3 "COUNT thresholds").
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct MaxCount {
    #[serde(rename = "Notify")]
    pub notify: u32,
    #[serde(rename = "Hard")]
    pub hard: u32,
}

/// Static, per-bearer configuration bound at entity construction and never
/// changed afterwards (spec.md §3, §5).
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BearerConfig {
    #[serde(rename = "SnSize")]
    pub sn_size: u8,
    #[serde(rename = "RlcMode")]
    pub rlc_mode: RlcMode,
    #[serde(rename = "BearerKind")]
    pub bearer_kind: BearerKind,
    #[serde(rename = "Direction")]
    pub direction: Direction,
    #[serde(rename = "DiscardTimer")]
    pub discard_timer: DiscardTimer,
    #[serde(rename = "StatusReportRequired")]
    pub status_report_required: bool,
    #[serde(rename = "MaxCount")]
    pub max_count: MaxCount,
    /// Logical channel id; the bearer id fed into the crypto pipeline is
    /// `lcid - 1` (spec.md §4.3).
    #[serde(rename = "Lcid")]
    pub lcid: u8,
}

impl BearerConfig {
    /// Zero-based bearer identifier fed to the integrity/ciphering
    /// algorithms (spec.md §4.3: "bearer_id = lcid - 1").
    pub fn bearer_id(&self) -> u8 {
        self.lcid.saturating_sub(1)
    }

    /// `true` for an acknowledged-mode data radio bearer: the only kind
    /// that caches protected PDUs for data recovery (spec.md §3).
    pub fn is_am_drb(&self) -> bool {
        matches!(self.bearer_kind, BearerKind::Drb) && matches!(self.rlc_mode, RlcMode::Am)
    }
}

/// Top-level configuration for one PDCP TX entity.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub bearer: BearerConfig,
    pub security: SecurityConfig,
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&s).context("failed to parse config YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates the invariants of spec.md §3 that are checkable without a
    /// running entity: `sn_size` is 12 or 18, SRB never pairs with 18-bit
    /// SN, and the COUNT thresholds are ordered (invariant 6 and the
    /// "COUNT thresholds" paragraph).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bearer.sn_size != 12 && self.bearer.sn_size != 18 {
            return Err(ConfigError::InvalidSnSize(self.bearer.sn_size));
        }
        if matches!(self.bearer.bearer_kind, BearerKind::Srb) && self.bearer.sn_size == 18 {
            return Err(ConfigError::SrbWith18BitSn);
        }
        if self.bearer.max_count.notify > self.bearer.max_count.hard {
            return Err(ConfigError::ThresholdOrder {
                notify: self.bearer.max_count.notify,
                hard: self.bearer.max_count.hard,
            });
        }
        Ok(())
    }
}

/// Serde helper for representing a 128-bit key as a hex string in YAML/JSON.
mod hex_key {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Key128;

    pub fn serialize<S: Serializer>(k: &Key128, s: S) -> Result<S::Ok, S::Error> {
        let mut out = String::with_capacity(32);
        for b in k {
            out.push_str(&format!("{b:02x}"));
        }
        out.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Key128, D::Error> {
        let s = String::deserialize(d)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        if s.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "expected 32 hex chars for a 128-bit key, got {}",
                s.len()
            )));
        }
        let mut out = [0u8; 16];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(out)
    }
}
