// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Activity log records for the hold list.
//!
//! Every successful change to a roster or its holds produces exactly one
//! [`AuditEvent`]. Events are immutable once created.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use holdlist_domain::RosterEntry;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The person or process that initiated a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "admin", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Why a change was made (request id plus free text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The kind of change recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    HoldScheduled,
    CompletedHold,
    HoldSkipped,
    HoldCancelled,
    HoldRescheduled,
    Added,
    AvailabilityChanged,
    Deactivated,
    Reactivated,
    Removed,
    ShiftTransfer,
    RosterReordered,
}

impl ActivityKind {
    /// Returns the string stored in the activity log.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HoldScheduled => "hold_scheduled",
            Self::CompletedHold => "completed_hold",
            Self::HoldSkipped => "hold_skipped",
            Self::HoldCancelled => "hold_cancelled",
            Self::HoldRescheduled => "hold_rescheduled",
            Self::Added => "added",
            Self::AvailabilityChanged => "availability_changed",
            Self::Deactivated => "deactivated",
            Self::Reactivated => "reactivated",
            Self::Removed => "removed",
            Self::ShiftTransfer => "shift_transfer",
            Self::RosterReordered => "roster_reordered",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What was done, with a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActivityKind,
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `kind` - The kind of change
    /// * `details` - Optional description shown in the activity log
    #[must_use]
    pub const fn new(kind: ActivityKind, details: Option<String>) -> Self {
        Self { kind, details }
    }
}

/// The firefighter a change was about.
///
/// The name is copied so the log stays readable after the roster entry is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub firefighter_id: String,
    pub firefighter_name: String,
}

impl Subject {
    /// Creates a subject from a roster entry.
    #[must_use]
    pub fn from_entry(entry: &RosterEntry) -> Self {
        Self {
            firefighter_id: entry.id.clone(),
            firefighter_name: entry.name.clone(),
        }
    }
}

/// A compact description of roster state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// One entry in the activity log.
///
/// Captures who made the change (actor), why (cause), what was done
/// (action), which firefighter it concerned (subject, if any), the state
/// before and after, and when it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub subject: Option<Subject>,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `subject` - The firefighter concerned, if any
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `recorded_at` - When the change was applied
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        subject: Option<Subject>,
        before: StateSnapshot,
        after: StateSnapshot,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            subject,
            before,
            after,
            recorded_at,
        }
    }

    /// One-line summary for display, e.g. `completed_hold: Jane Smith - Completed hold ...`.
    #[must_use]
    pub fn summary(&self) -> String {
        let who: &str = self
            .subject
            .as_ref()
            .map_or("System", |s| s.firefighter_name.as_str());
        match &self.action.details {
            Some(details) => format!("{}: {who} - {details}", self.action.kind),
            None => format!("{}: {who}", self.action.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdlist_domain::Shift;
    use time::macros::datetime;

    fn sample_event(subject: Option<Subject>) -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("captain-1"), String::from("operator")),
            Cause::new(String::from("req-1"), String::from("Morning lineup")),
            Action::new(
                ActivityKind::CompletedHold,
                Some(String::from("Completed hold and moved to position 3")),
            ),
            subject,
            StateSnapshot::new(String::from("before-state")),
            StateSnapshot::new(String::from("after-state")),
            datetime!(2026-03-10 07:30 UTC),
        )
    }

    #[test]
    fn test_activity_kind_strings() {
        assert_eq!(ActivityKind::CompletedHold.as_str(), "completed_hold");
        assert_eq!(ActivityKind::Added.to_string(), "added");
        assert_eq!(ActivityKind::Deactivated.as_str(), "deactivated");
    }

    #[test]
    fn test_subject_copies_entry_identity() {
        let entry = RosterEntry::new("ff-1", "Jane Smith", Shift::B, 0);
        let subject = Subject::from_entry(&entry);

        assert_eq!(subject.firefighter_id, "ff-1");
        assert_eq!(subject.firefighter_name, "Jane Smith");
    }

    #[test]
    fn test_summary_names_subject() {
        let entry = RosterEntry::new("ff-1", "Jane Smith", Shift::B, 0);
        let event = sample_event(Some(Subject::from_entry(&entry)));

        assert_eq!(
            event.summary(),
            "completed_hold: Jane Smith - Completed hold and moved to position 3"
        );
    }

    #[test]
    fn test_summary_without_subject_is_system() {
        let mut event = sample_event(None);
        event.action = Action::new(ActivityKind::RosterReordered, None);

        assert_eq!(event.summary(), "roster_reordered: System");
    }

    #[test]
    fn test_event_serializes_kind_and_timestamp() {
        let event = sample_event(None);
        let json = serde_json::to_value(&event).unwrap_or_default();

        assert_eq!(json["action"]["kind"], "completed_hold");
        assert_eq!(json["recorded_at"], "2026-03-10T07:30:00Z");
        assert!(json["subject"].is_null());
    }
}
