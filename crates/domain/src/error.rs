// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised when records or identifiers do not fit the domain model.
///
/// These are structural failures (unknown ids, unparseable values). Rule
/// violations on a hold are reported separately as [`HoldViolation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// No roster entry carries the given id.
    #[error("Firefighter '{id}' not found")]
    FirefighterNotFound {
        /// The requested id.
        id: String,
    },
    /// No hold carries the given id.
    #[error("Hold '{id}' not found")]
    HoldNotFound {
        /// The requested id.
        id: String,
    },
    /// A roster entry with the same id already exists.
    #[error("Firefighter '{id}' already exists")]
    DuplicateFirefighter {
        /// The duplicate id.
        id: String,
    },
    /// A hold with the same id already exists.
    #[error("Hold '{id}' already exists")]
    DuplicateHold {
        /// The duplicate id.
        id: String,
    },
    /// The firefighter has been deactivated.
    #[error("Firefighter '{id}' is not active")]
    FirefighterInactive {
        /// The firefighter id.
        id: String,
    },
    /// The firefighter is already on the active roster.
    #[error("Firefighter '{id}' is already active")]
    FirefighterAlreadyActive {
        /// The firefighter id.
        id: String,
    },
    /// A transfer names the shift the firefighter is already on.
    #[error("Firefighter '{id}' is already on shift {shift}")]
    AlreadyOnShift {
        /// The firefighter id.
        id: String,
        /// The shift both rosters belong to.
        shift: String,
    },
    /// Firefighter id or name is blank.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// Shift identifier is not one of A, B or C.
    #[error("Invalid shift: '{0}'. Must be A, B, or C")]
    InvalidShift(String),
    /// Hold status string is not recognized.
    #[error("Invalid hold status: '{status}'")]
    InvalidHoldStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Hold duration string is not recognized.
    #[error("Invalid hold duration: '{0}'. Must be 12h or 24h")]
    InvalidHoldDuration(String),
    /// The operation only applies to holds that are still scheduled.
    #[error("Hold '{id}' is {status}, only scheduled holds can be changed this way")]
    HoldNotScheduled {
        /// The hold id.
        id: String,
        /// The hold's current status.
        status: String,
    },
    /// The hold has already been resolved to the requested status.
    #[error("Hold '{id}' is already {status}")]
    HoldAlreadyInStatus {
        /// The hold id.
        id: String,
        /// The hold's current status.
        status: String,
    },
    /// A requested roster order does not cover the active roster exactly.
    #[error("Invalid roster order: {reason}")]
    InvalidRosterOrder {
        /// What is wrong with the requested order.
        reason: String,
    },
    /// Failed to parse a date string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

/// A hold rule that rejected a proposed change.
///
/// The `Display` text is the message surfaced to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoldViolation {
    /// The hold date could not be parsed.
    #[error("Invalid date provided")]
    InvalidDate,
    /// The hold date is before today.
    #[error("Cannot schedule hold in the past")]
    DateInPast,
    /// The hold date is more than 90 days after today.
    #[error("Cannot schedule hold more than 90 days in advance")]
    DateTooFarAhead,
    /// A completed hold cannot move to any other status.
    #[error("Cannot change status of completed hold")]
    CompletedHoldIsFinal,
    /// Leaving the skipped status needs an admin override.
    #[error("Cannot change status of skipped hold without admin override")]
    SkippedHoldRequiresOverride,
    /// No firefighter with the given id is on the roster.
    #[error("Firefighter not found")]
    FirefighterNotFound,
    /// The firefighter has been taken off the hold list.
    #[error("Firefighter is not active")]
    FirefighterInactive,
    /// The firefighter is marked unavailable.
    #[error("Firefighter is not available for holds")]
    FirefighterUnavailable,
    /// The firefighter already has 3 scheduled or completed holds in the
    /// Sunday to Saturday week.
    #[error("Firefighter already has 3 holds this week")]
    WeeklyHoldLimitReached,
    /// The firefighter already holds on this date.
    #[error("Firefighter already has a hold scheduled on {date}")]
    ScheduleConflict {
        /// Date portion of the conflicting hold date.
        date: String,
    },
    /// No station was given and the firefighter has none on file.
    #[error("Fire station is required")]
    FireStationRequired,
    /// The station is not a whole number from 1 to 99.
    #[error("Fire station must be a number between 1 and 99")]
    FireStationOutOfRange,
    /// The shift is not A, B or C.
    #[error("Invalid shift. Must be A, B, or C")]
    InvalidShift,
    /// The firefighter was lent to the shift they already work.
    #[error("Cannot lend firefighter to their own shift")]
    LentToOwnShift,
    /// A skipped hold must say why.
    #[error("Notes are required when skipping a hold")]
    NotesRequired,
    /// The hold was created more than 7 days ago and no admin override was given.
    #[error(
        "This hold is locked (created more than 1 week ago) and cannot be edited. Contact an administrator for override."
    )]
    HoldLocked,
    /// The duration is not `12h` or `24h`.
    #[error("Hold duration must be either 12h or 24h")]
    InvalidDuration,
    /// The start time is not `HH:MM` or `HH:MM:SS` on a 24-hour clock.
    #[error("Start time must be in HH:MM or HH:MM:SS format")]
    InvalidStartTime,
}
