// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The ordered COUNT → (cached PDU?, timer) discard map (spec.md §3, §4.4,
//! §9 "ordered map keyed by COUNT").
//!
//! The entity is single-threaded cooperative (spec.md §5), so a plain
//! `BTreeMap` suffices: no concurrent map is needed, and it gives the
//! ascending-order range-erase the status-report handler and
//! `data_recovery` both require for free.

use std::collections::BTreeMap;

use crate::entity::collaborators::TimerHandle;

/// One in-flight, not-yet-discarded-or-acknowledged PDU.
pub struct DiscardEntry {
    /// Present iff the bearer is an AM DRB (spec.md §3, invariant 5).
    pub cached_pdu: Option<Vec<u8>>,
    pub timer: TimerHandle,
}

/// The discard-timer map for one entity.
#[derive(Default)]
pub struct DiscardMap {
    entries: BTreeMap<u32, DiscardEntry>,
}

impl DiscardMap {
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Inserts a new entry. Duplicate insertion for a live COUNT cannot
    /// happen under invariant (1); debug-asserted here per spec.md §4.4.
    pub fn insert(&mut self, count: u32, cached_pdu: Option<Vec<u8>>, timer: TimerHandle) {
        debug_assert!(
            !self.entries.contains_key(&count),
            "duplicate discard-map insertion for COUNT {count}"
        );
        self.entries.insert(count, DiscardEntry { cached_pdu, timer });
    }

    pub fn contains(&self, count: u32) -> bool {
        self.entries.contains_key(&count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns a single entry, cancelling its timer.
    pub fn erase(&mut self, count: u32) -> Option<DiscardEntry> {
        let entry = self.entries.remove(&count)?;
        entry.timer.cancel();
        Some(entry)
    }

    /// Removes every entry with COUNT strictly less than `fmc`, cancelling
    /// their timers, and returns the removed COUNTs in ascending order
    /// (spec.md §4.5 action 1).
    pub fn erase_below(&mut self, fmc: u32) -> Vec<u32> {
        let to_remove: Vec<u32> = self.entries.range(..fmc).map(|(&c, _)| c).collect();
        for count in &to_remove {
            if let Some(entry) = self.entries.remove(count) {
                entry.timer.cancel();
            }
        }
        to_remove
    }

    /// Cached entries in ascending COUNT order, for `data_recovery`
    /// (spec.md §4.6).
    pub fn cached_in_order(&self) -> Vec<(u32, Vec<u8>)> {
        self.entries
            .iter()
            .filter_map(|(&count, entry)| entry.cached_pdu.as_ref().map(|pdu| (count, pdu.clone())))
            .collect()
    }

    /// Cancels every live timer and drops all entries (bearer teardown,
    /// spec.md §5).
    pub fn clear(&mut self) {
        for (_, entry) in self.entries.iter() {
            entry.timer.cancel();
        }
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use super::*;
    use crate::entity::collaborators::{LocalTimerService, TimerService};

    fn dummy_timer() -> TimerHandle {
        LocalTimerService.arm(Duration::from_secs(3600), Box::new(|| {}))
    }

    #[tokio::test(flavor = "current_thread")]
    async fn scenario_5_prune_below_fmc_and_by_bitmap() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let mut map = DiscardMap::new();
                for count in [3u32, 4, 5, 7, 9] {
                    map.insert(count, None, dummy_timer());
                }
                let removed = map.erase_below(5);
                assert_eq!(removed, vec![3, 4]);
                assert!(map.contains(5));
                assert!(map.contains(7));
                assert!(map.contains(9));

                map.erase(9);
                assert_eq!(map.len(), 2);
                assert!(!map.contains(9));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread")]
    async fn cached_in_order_skips_uncached_entries() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let mut map = DiscardMap::new();
                map.insert(2, Some(vec![0xAA]), dummy_timer());
                map.insert(3, None, dummy_timer());
                map.insert(4, Some(vec![0xBB]), dummy_timer());
                assert_eq!(
                    map.cached_in_order(),
                    vec![(2, vec![0xAA]), (4, vec![0xBB])]
                );
            })
            .await;
    }
}
