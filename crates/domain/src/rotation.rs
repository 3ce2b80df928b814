// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rotation ordering for the hold list.
//!
//! The rotation is a total order over roster entries given by
//! `order_position`. Available entries come first, lowest position first;
//! the entry at the top is next up for a hold.
//!
//! ## Invariants
//!
//! - After renumbering, positions over the full collection are exactly
//!   `0..n` with no duplicates and no gaps
//! - Every available entry is positioned before every unavailable entry
//! - Entries with equal positions keep their input order
//!
//! ## Usage
//!
//! Every function here is total: unknown ids, empty collections and
//! ineligible targets produce a well-formed result instead of an error.
//! Inputs are never modified; new collections are returned.

use crate::types::RosterEntry;
use time::{Date, Duration};

/// Orders entries for display: available entries by ascending position,
/// then unavailable entries in the order they were given.
///
/// Positions are left untouched.
#[must_use]
pub fn sort_roster(entries: &[RosterEntry]) -> Vec<RosterEntry> {
    let (mut available, unavailable): (Vec<RosterEntry>, Vec<RosterEntry>) =
        entries.iter().cloned().partition(|e| e.is_available);
    available.sort_by_key(|e| e.order_position);
    available.extend(unavailable);
    available
}

/// Renumbers positions to `0..n`, available entries first.
///
/// Available entries are ordered by their current position and unavailable
/// entries keep their relative input order. Sparse or duplicate positions
/// are normalized.
#[must_use]
pub fn recalculate_positions(entries: &[RosterEntry]) -> Vec<RosterEntry> {
    assign_positions(&sort_roster(entries))
}

/// Renumbers positions to `0..n` in exactly the given order.
///
/// Used when the caller has already placed entries where they belong.
#[must_use]
pub fn assign_positions(entries: &[RosterEntry]) -> Vec<RosterEntry> {
    entries
        .iter()
        .zip(0_u32..)
        .map(|(entry, position)| RosterEntry {
            order_position: position,
            ..entry.clone()
        })
        .collect()
}

/// Highest position held by an available entry.
fn max_available_position(entries: &[RosterEntry]) -> Option<u32> {
    entries
        .iter()
        .filter(|e| e.is_available)
        .map(|e| e.order_position)
        .max()
}

/// Position one past the last available entry, or 0 when nobody is available.
///
/// This is where a newly added member joins the rotation.
#[must_use]
pub fn next_position(entries: &[RosterEntry]) -> u32 {
    max_available_position(entries).map_or(0, |max| max.saturating_add(1))
}

/// Sends the target entry behind every available entry.
///
/// The target gets `max(available positions) + 1`; nothing else moves. If
/// the target is unknown or unavailable the input is returned unchanged.
///
/// The result usually has a gap where the target used to be. Follow up with
/// [`recalculate_positions`], or use [`complete_and_renumber`] which does both.
#[must_use]
pub fn move_to_bottom(entries: &[RosterEntry], target_id: &str) -> Vec<RosterEntry> {
    let eligible: bool = entries
        .iter()
        .any(|e| e.id == target_id && e.is_available);
    if !eligible {
        return entries.to_vec();
    }

    let bottom: u32 = next_position(entries);
    entries
        .iter()
        .map(|e| {
            if e.id == target_id {
                RosterEntry {
                    order_position: bottom,
                    ..e.clone()
                }
            } else {
                e.clone()
            }
        })
        .collect()
}

/// Moves the target to the bottom of the available entries and renumbers.
#[must_use]
pub fn complete_and_renumber(entries: &[RosterEntry], target_id: &str) -> Vec<RosterEntry> {
    recalculate_positions(&move_to_bottom(entries, target_id))
}

/// Reinserts the target at a 1-based position and renumbers in list order.
///
/// The collection is first put in rotation order. 0 is treated as 1. An
/// available target stays among the available entries, so positions past
/// them place it last of the available; an unavailable target stays among
/// the unavailable. Unknown ids leave the collection as it was.
#[must_use]
pub fn place_at(entries: &[RosterEntry], target_id: &str, position: usize) -> Vec<RosterEntry> {
    let ordered: Vec<RosterEntry> = sort_roster(entries);
    let Some(index) = ordered.iter().position(|e| e.id == target_id) else {
        return entries.to_vec();
    };

    let mut rest: Vec<RosterEntry> = ordered;
    let target: RosterEntry = rest.remove(index);
    let available: usize = rest.iter().filter(|e| e.is_available).count();
    let wanted: usize = position.saturating_sub(1);
    let slot: usize = if target.is_available {
        wanted.min(available)
    } else {
        wanted.clamp(available, rest.len())
    };
    rest.insert(slot, target);
    assign_positions(&rest)
}

/// Puts an entry at the top of the rotation and renumbers everyone below it.
///
/// Any existing entry with the same id is replaced.
#[must_use]
pub fn place_at_top(entries: &[RosterEntry], entry: RosterEntry) -> Vec<RosterEntry> {
    let mut ordered: Vec<RosterEntry> = sort_roster(entries)
        .into_iter()
        .filter(|e| e.id != entry.id)
        .collect();
    ordered.insert(0, entry);
    assign_positions(&ordered)
}

/// The available entry with the lowest position.
#[must_use]
pub fn next_available(entries: &[RosterEntry]) -> Option<&RosterEntry> {
    entries
        .iter()
        .filter(|e| e.is_available)
        .min_by_key(|e| e.order_position)
}

/// Projects who holds on each of `days` consecutive days starting at `start`.
///
/// Available entries take turns in rotation order, wrapping around when the
/// list runs out. Returns nothing when nobody is available.
#[must_use]
pub fn plan_rotation(entries: &[RosterEntry], start: Date, days: u32) -> Vec<(Date, RosterEntry)> {
    let available: Vec<RosterEntry> = sort_roster(entries)
        .into_iter()
        .filter(|e| e.is_available)
        .collect();
    if available.is_empty() {
        return Vec::new();
    }

    (0..days)
        .map_while(|offset| {
            let day: Date = start.checked_add(Duration::days(i64::from(offset)))?;
            let entry: &RosterEntry = &available[offset as usize % available.len()];
            Some((day, entry.clone()))
        })
        .collect()
}
