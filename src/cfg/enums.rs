// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Signalling vs data radio bearer (spec.md §3 "Bearer kind").
///
/// Drives the key domain (RRC vs UP) and whether an 18-bit SN is allowed.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerKind {
    #[serde(rename = "SRB", alias = "srb")]
    Srb,
    #[serde(rename = "DRB", alias = "drb")]
    Drb,
}
impl fmt::Display for BearerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BearerKind::Srb => "SRB",
            BearerKind::Drb => "DRB",
        })
    }
}

/// Underlying RLC mode (spec.md §3 "RLC mode").
///
/// Only `Am` DRBs cache protected PDUs for data recovery.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlcMode {
    #[serde(rename = "UM", alias = "um")]
    Um,
    #[serde(rename = "AM", alias = "am")]
    Am,
}
impl fmt::Display for RlcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RlcMode::Um => "UM",
            RlcMode::Am => "AM",
        })
    }
}

/// Transmission direction, fixed at entity creation (spec.md §3).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[serde(rename = "UL", alias = "ul")]
    Uplink,
    #[serde(rename = "DL", alias = "dl")]
    Downlink,
}
impl Direction {
    /// The single bit fed into the crypto input tuple (TS 33.401 Annex B).
    pub fn as_bit(self) -> u8 {
        match self {
            Direction::Uplink => 0,
            Direction::Downlink => 1,
        }
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Uplink => "UL",
            Direction::Downlink => "DL",
        })
    }
}

/// Integrity algorithm identifiers (spec.md GLOSSARY "nia0..3").
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegAlgo {
    #[serde(rename = "NIA0")]
    Nia0,
    #[serde(rename = "NIA1")]
    Nia1,
    #[serde(rename = "NIA2")]
    Nia2,
    #[serde(rename = "NIA3")]
    Nia3,
}
impl fmt::Display for IntegAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntegAlgo::Nia0 => "NIA0",
            IntegAlgo::Nia1 => "NIA1",
            IntegAlgo::Nia2 => "NIA2",
            IntegAlgo::Nia3 => "NIA3",
        })
    }
}

/// Ciphering algorithm identifiers (spec.md GLOSSARY "nea0..3").
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgo {
    #[serde(rename = "NEA0")]
    Nea0,
    #[serde(rename = "NEA1")]
    Nea1,
    #[serde(rename = "NEA2")]
    Nea2,
    #[serde(rename = "NEA3")]
    Nea3,
}
impl fmt::Display for CipherAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CipherAlgo::Nea0 => "NEA0",
            CipherAlgo::Nea1 => "NEA1",
            CipherAlgo::Nea2 => "NEA2",
            CipherAlgo::Nea3 => "NEA3",
        })
    }
}

/// Discard timer configuration (spec.md §3 "Discard timer configuration").
///
/// `NotConfigured` and `Infinity` both disable discard tracking entirely.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DiscardTimer {
    NotConfigured,
    Infinity,
    Ms10,
    Ms20,
    Ms30,
    Ms40,
    Ms50,
    Ms60,
    Ms75,
    Ms100,
    Ms150,
    Ms200,
    Ms250,
    Ms300,
    Ms500,
    Ms750,
    Ms1500,
}
impl DiscardTimer {
    /// Returns `Some(duration)` when the timer is armed, `None` when
    /// discard tracking is disabled (`NotConfigured` or `Infinity`).
    pub fn duration(self) -> Option<Duration> {
        let ms = match self {
            DiscardTimer::NotConfigured | DiscardTimer::Infinity => return None,
            DiscardTimer::Ms10 => 10,
            DiscardTimer::Ms20 => 20,
            DiscardTimer::Ms30 => 30,
            DiscardTimer::Ms40 => 40,
            DiscardTimer::Ms50 => 50,
            DiscardTimer::Ms60 => 60,
            DiscardTimer::Ms75 => 75,
            DiscardTimer::Ms100 => 100,
            DiscardTimer::Ms150 => 150,
            DiscardTimer::Ms200 => 200,
            DiscardTimer::Ms250 => 250,
            DiscardTimer::Ms300 => 300,
            DiscardTimer::Ms500 => 500,
            DiscardTimer::Ms750 => 750,
            DiscardTimer::Ms1500 => 1500,
        };
        Some(Duration::from_millis(ms))
    }
}
