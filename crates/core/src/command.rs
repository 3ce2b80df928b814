// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A command represents operator intent as data only.
///
/// Commands are the only way to request state changes. Optional fields are
/// kept as the raw strings an operator typed so that they go through the
/// same validation rules as any other input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Put a firefighter on a hold for a date.
    ScheduleHold {
        /// Identifier for the new hold.
        hold_id: String,
        /// The roster entry being held.
        firefighter_id: String,
        /// `YYYY-MM-DD`; any time component is dropped.
        hold_date: String,
        /// Station worked; defaults to the firefighter's home station.
        fire_station: Option<String>,
        /// Shift the firefighter is lent to, if any.
        lent_to_shift: Option<String>,
        /// `12h` or `24h`; defaults to `24h`.
        duration: Option<String>,
        /// `HH:MM` or `HH:MM:SS`; defaults to `07:00`.
        start_time: Option<String>,
        notes: Option<String>,
    },
    /// Mark a hold as worked and rotate the firefighter.
    CompleteHold {
        hold_id: String,
        /// 1-based position to place the firefighter at; bottom when `None`.
        new_position: Option<usize>,
        /// Required to complete a hold that was skipped.
        admin_override: bool,
    },
    /// Pass over a scheduled hold. The firefighter keeps their place.
    SkipHold {
        hold_id: String,
        /// Why the hold was skipped. Required.
        notes: Option<String>,
    },
    /// Remove a hold from the calendar.
    CancelHold {
        hold_id: String,
        /// Required to remove a resolved hold once it is locked.
        admin_override: bool,
    },
    /// Move a scheduled hold to another date.
    RescheduleHold {
        hold_id: String,
        hold_date: String,
        /// Required once the hold is locked.
        admin_override: bool,
    },
    /// Add a firefighter to the bottom of the rotation.
    AddFirefighter {
        id: String,
        name: String,
        fire_station: String,
    },
    /// Mark a firefighter available or unavailable for holds.
    SetAvailability {
        firefighter_id: String,
        available: bool,
    },
    /// Remove a firefighter from the rotation, keeping their history.
    DeactivateFirefighter { firefighter_id: String },
    /// Bring a deactivated firefighter back at the top of the rotation.
    ReactivateFirefighter { firefighter_id: String },
    /// Delete a firefighter outright. Their holds stay on the calendar
    /// under the name recorded on each hold.
    RemoveFirefighter { firefighter_id: String },
    /// Set the rotation to the given order of active firefighters.
    ///
    /// Unavailable members keep their relative order but always follow the
    /// available ones.
    ReorderRoster { ordered_ids: Vec<String> },
}

impl Command {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScheduleHold { .. } => "ScheduleHold",
            Self::CompleteHold { .. } => "CompleteHold",
            Self::SkipHold { .. } => "SkipHold",
            Self::CancelHold { .. } => "CancelHold",
            Self::RescheduleHold { .. } => "RescheduleHold",
            Self::AddFirefighter { .. } => "AddFirefighter",
            Self::SetAvailability { .. } => "SetAvailability",
            Self::DeactivateFirefighter { .. } => "DeactivateFirefighter",
            Self::ReactivateFirefighter { .. } => "ReactivateFirefighter",
            Self::RemoveFirefighter { .. } => "RemoveFirefighter",
            Self::ReorderRoster { .. } => "ReorderRoster",
        }
    }
}
