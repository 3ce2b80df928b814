// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use holdlist_audit::{AuditEvent, StateSnapshot};
use holdlist_domain::{RosterEntry, ScheduledHold, Shift, next_available, sort_roster};
use serde::{Deserialize, Serialize};

/// The hold list for a single shift.
///
/// The roster keeps inactive entries so that history stays attached to
/// them. Only active entries take part in the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// The shift this roster belongs to.
    pub shift: Shift,
    /// Every firefighter ever added to this shift's hold list.
    pub roster: Vec<RosterEntry>,
    /// All holds, whatever their status.
    #[serde(default)]
    pub holds: Vec<ScheduledHold>,
}

impl State {
    /// Creates an empty hold list for a shift.
    #[must_use]
    pub const fn new(shift: Shift) -> Self {
        Self {
            shift,
            roster: Vec::new(),
            holds: Vec::new(),
        }
    }

    /// Active entries in rotation order: available by position, then unavailable.
    #[must_use]
    pub fn rotation(&self) -> Vec<RosterEntry> {
        sort_roster(&self.active_entries())
    }

    /// The firefighter due for the next hold, if anyone is available.
    #[must_use]
    pub fn next_up(&self) -> Option<RosterEntry> {
        next_available(&self.active_entries()).cloned()
    }

    #[must_use]
    pub fn find_firefighter(&self, id: &str) -> Option<&RosterEntry> {
        self.roster.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn find_hold(&self, id: &str) -> Option<&ScheduledHold> {
        self.holds.iter().find(|h| h.id == id)
    }

    /// Holds for a firefighter, oldest date first.
    #[must_use]
    pub fn holds_for(&self, firefighter_id: &str) -> Vec<&ScheduledHold> {
        let mut holds: Vec<&ScheduledHold> = self
            .holds
            .iter()
            .filter(|h| h.firefighter_id == firefighter_id)
            .collect();
        holds.sort_by(|a, b| a.hold_day().cmp(b.hold_day()));
        holds
    }

    fn active_entries(&self) -> Vec<RosterEntry> {
        self.roster.iter().filter(|e| e.is_active).cloned().collect()
    }

    /// Replaces the active part of the roster with the result of `reorder`.
    ///
    /// Inactive entries are kept after the active ones, untouched.
    pub(crate) fn reorder_active(
        &mut self,
        reorder: impl FnOnce(&[RosterEntry]) -> Vec<RosterEntry>,
    ) {
        let (active, inactive): (Vec<RosterEntry>, Vec<RosterEntry>) =
            self.roster.drain(..).partition(|e| e.is_active);
        let mut roster: Vec<RosterEntry> = reorder(&active);
        roster.extend(inactive);
        self.roster = roster;
    }

    /// Compact summary used in activity log entries.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let active: usize = self.roster.iter().filter(|e| e.is_active).count();
        let next: String = self.next_up().map_or_else(|| String::from("none"), |e| e.id);
        StateSnapshot::new(format!(
            "shift={},roster={},active={active},holds={},next={next}",
            self.shift,
            self.roster.len(),
            self.holds.len()
        ))
    }
}

/// The result of a successful state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Advisory messages that did not block the change.
    pub warnings: Vec<String>,
}

/// The result of moving a firefighter between two shifts' hold lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    /// The hold list the firefighter left.
    pub source: State,
    /// The hold list the firefighter joined.
    pub destination: State,
    /// One audit event covering both lists.
    pub audit_event: AuditEvent,
}
