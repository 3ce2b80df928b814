// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rules gating changes to scheduled holds.
//!
//! Every rule is an independent, pure predicate returning a
//! [`ValidationResult`]. A rejected result carries the violated rule; an
//! accepted result may carry an advisory warning that should be shown
//! without blocking. Rules that depend on the current date take it as an
//! argument.

use crate::error::HoldViolation;
use crate::hold_status::HoldStatus;
use crate::types::{
    HoldDuration, RosterEntry, ScheduledHold, Shift, date_portion, parse_calendar_date,
};
use serde::Serialize;
use std::ops::RangeInclusive;
use time::{Date, Duration, OffsetDateTime};

/// Furthest a hold may be scheduled ahead of today, in days.
pub const MAX_DAYS_IN_ADVANCE: i64 = 90;
/// Maximum non-skipped holds per firefighter in one Sunday-to-Saturday week.
pub const MAX_HOLDS_PER_WEEK: usize = 3;
/// Age after which a hold is locked against edits and cancellation.
pub const HOLD_LOCK_DAYS: i64 = 7;
/// Hours per period beyond which manual verification is recommended.
pub const WORK_HOUR_LIMIT: u32 = 72;
/// Distance below the hour limit at which an approaching-limit warning is given.
pub const WORK_HOUR_WARNING_BAND: u32 = 12;
/// Start time applied when none is given.
pub const DEFAULT_START_TIME: &str = "07:00";
/// Valid fire station numbers.
pub const FIRE_STATION_RANGE: RangeInclusive<i64> = 1..=99;

/// Outcome of a single rule check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_violation"
    )]
    pub error: Option<HoldViolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[allow(clippy::ref_option)]
fn serialize_violation<S: serde::Serializer>(
    violation: &Option<HoldViolation>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match violation {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}

impl ValidationResult {
    /// An accepted result with nothing to report.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            warning: None,
        }
    }

    /// An accepted result carrying an advisory warning.
    #[must_use]
    pub fn ok_with_warning(warning: impl Into<String>) -> Self {
        Self {
            valid: true,
            error: None,
            warning: Some(warning.into()),
        }
    }

    /// A rejected result.
    #[must_use]
    pub const fn rejected(violation: HoldViolation) -> Self {
        Self {
            valid: false,
            error: Some(violation),
            warning: None,
        }
    }

    /// Returns the human-readable rejection message, if rejected.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Converts the result into a `Result`, keeping any warning on success.
    ///
    /// # Errors
    ///
    /// Returns the violated rule if the result is not valid.
    pub fn into_result(self) -> Result<Option<String>, HoldViolation> {
        match self.error {
            Some(violation) if !self.valid => Err(violation),
            _ => Ok(self.warning),
        }
    }
}

impl From<Result<(), HoldViolation>> for ValidationResult {
    fn from(result: Result<(), HoldViolation>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(violation) => Self::rejected(violation),
        }
    }
}

/// Validates that a hold date can be scheduled.
///
/// Only the date portion is considered. The date must not be before `today`
/// and not more than [`MAX_DAYS_IN_ADVANCE`] days after it.
#[must_use]
pub fn validate_hold_date(candidate: &str, today: Date) -> ValidationResult {
    let Ok(hold_date) = parse_calendar_date(candidate) else {
        return ValidationResult::rejected(HoldViolation::InvalidDate);
    };

    if hold_date < today {
        return ValidationResult::rejected(HoldViolation::DateInPast);
    }

    let too_far: bool = today
        .checked_add(Duration::days(MAX_DAYS_IN_ADVANCE))
        .is_none_or(|horizon| hold_date > horizon);
    if too_far {
        return ValidationResult::rejected(HoldViolation::DateTooFarAhead);
    }

    ValidationResult::ok()
}

/// Validates a hold status change. See [`HoldStatus::validate_transition`].
#[must_use]
pub fn validate_status_transition(
    from: HoldStatus,
    to: HoldStatus,
    admin_override: bool,
) -> ValidationResult {
    from.validate_transition(to, admin_override).into()
}

/// First day (Sunday) of the week containing `day`.
fn week_start(day: Date) -> Date {
    let back: i64 = i64::from(day.weekday().number_days_from_sunday());
    day.checked_sub(Duration::days(back)).unwrap_or(Date::MIN)
}

/// Validates that a firefighter may be given another hold.
///
/// The firefighter must exist, be active and be available, and must have
/// fewer than [`MAX_HOLDS_PER_WEEK`] non-skipped holds in the week that
/// contains `today`. Holds with unreadable dates do not count.
#[must_use]
pub fn validate_firefighter_for_hold(
    firefighter: Option<&RosterEntry>,
    existing_holds: &[ScheduledHold],
    today: Date,
) -> ValidationResult {
    let Some(firefighter) = firefighter else {
        return ValidationResult::rejected(HoldViolation::FirefighterNotFound);
    };

    if !firefighter.is_active {
        return ValidationResult::rejected(HoldViolation::FirefighterInactive);
    }

    if !firefighter.is_available {
        return ValidationResult::rejected(HoldViolation::FirefighterUnavailable);
    }

    let start: Date = week_start(today);
    let end: Option<Date> = start.checked_add(Duration::days(7));
    let holds_this_week: usize = existing_holds
        .iter()
        .filter(|h| h.firefighter_id == firefighter.id && h.status != HoldStatus::Skipped)
        .filter_map(|h| h.calendar_date().ok())
        .filter(|d| *d >= start && end.is_none_or(|end| *d < end))
        .count();

    if holds_this_week >= MAX_HOLDS_PER_WEEK {
        return ValidationResult::rejected(HoldViolation::WeeklyHoldLimitReached);
    }

    ValidationResult::ok()
}

/// Validates that a firefighter is not already holding on the same date.
///
/// Skipped holds never conflict. Different firefighters may share a date.
#[must_use]
pub fn validate_schedule_conflict(
    existing_holds: &[ScheduledHold],
    firefighter_id: &str,
    hold_date: &str,
) -> ValidationResult {
    let day: &str = date_portion(hold_date);
    let conflict: bool = existing_holds.iter().any(|h| {
        h.firefighter_id == firefighter_id
            && h.hold_day() == day
            && h.status != HoldStatus::Skipped
    });

    if conflict {
        return ValidationResult::rejected(HoldViolation::ScheduleConflict {
            date: day.to_string(),
        });
    }

    ValidationResult::ok()
}

/// Reads a leading integer the way a lenient number field does: surrounding
/// whitespace and trailing non-digits are ignored.
fn parse_leading_integer(s: &str) -> Option<i64> {
    let s: &str = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end: usize = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Validates a fire station number.
///
/// The station is required and must read as a number in
/// [`FIRE_STATION_RANGE`].
#[must_use]
pub fn validate_fire_station(station: Option<&str>) -> ValidationResult {
    let Some(station) = station.filter(|s| !s.trim().is_empty()) else {
        return ValidationResult::rejected(HoldViolation::FireStationRequired);
    };

    match parse_leading_integer(station) {
        Some(number) if FIRE_STATION_RANGE.contains(&number) => ValidationResult::ok(),
        _ => ValidationResult::rejected(HoldViolation::FireStationOutOfRange),
    }
}

/// Validates lending a firefighter to another shift.
///
/// Lending is optional. When given, the target must be a known shift other
/// than the firefighter's own.
#[must_use]
pub fn validate_lent_to_shift(home_shift: Shift, lent_to: Option<&str>) -> ValidationResult {
    let Some(lent_to) = lent_to.filter(|s| !s.is_empty()) else {
        return ValidationResult::ok();
    };

    match lent_to.parse::<Shift>() {
        Err(_) => ValidationResult::rejected(HoldViolation::InvalidShift),
        Ok(target) if target == home_shift => {
            ValidationResult::rejected(HoldViolation::LentToOwnShift)
        }
        Ok(_) => ValidationResult::ok(),
    }
}

/// Validates that notes are present when a hold is skipped.
#[must_use]
pub fn validate_hold_notes(status: HoldStatus, notes: Option<&str>) -> ValidationResult {
    let blank: bool = notes.is_none_or(|n| n.trim().is_empty());
    if status == HoldStatus::Skipped && blank {
        return ValidationResult::rejected(HoldViolation::NotesRequired);
    }

    ValidationResult::ok()
}

/// Checks a hold against the 72-hour work limit.
///
/// Hours are tracked for information only, so this never rejects. A warning
/// is returned when the firefighter is already over the limit, would go over
/// it with this hold, or would come within [`WORK_HOUR_WARNING_BAND`] hours
/// of it.
#[must_use]
pub fn validate_72_hour_rule(firefighter: &RosterEntry, duration: HoldDuration) -> ValidationResult {
    let worked: u32 = firefighter.hours_worked_this_period.unwrap_or(0);
    let total: u32 = worked.saturating_add(duration.hours());
    let name: &str = &firefighter.name;

    if worked > WORK_HOUR_LIMIT {
        return ValidationResult::ok_with_warning(format!(
            "{name} has already worked {worked} hours this period (exceeds {WORK_HOUR_LIMIT}-hour limit). Manual verification recommended."
        ));
    }

    if total > WORK_HOUR_LIMIT {
        return ValidationResult::ok_with_warning(format!(
            "{name} has worked {worked} hours. Adding this {duration} hold would total {total} hours (exceeds {WORK_HOUR_LIMIT}-hour limit). Manual verification recommended."
        ));
    }

    if total > WORK_HOUR_LIMIT - WORK_HOUR_WARNING_BAND {
        return ValidationResult::ok_with_warning(format!(
            "{name} will have {total} hours after this hold (approaching {WORK_HOUR_LIMIT}-hour limit)."
        ));
    }

    ValidationResult::ok()
}

/// Returns true once a hold is more than [`HOLD_LOCK_DAYS`] days old.
#[must_use]
pub fn is_hold_locked(hold: &ScheduledHold, now: OffsetDateTime) -> bool {
    now - hold.created_at > Duration::days(HOLD_LOCK_DAYS)
}

/// Validates that a hold may be edited or cancelled.
///
/// Locked holds need an administrator override.
#[must_use]
pub fn validate_hold_editable(
    hold: &ScheduledHold,
    admin_override: bool,
    now: OffsetDateTime,
) -> ValidationResult {
    if is_hold_locked(hold, now) && !admin_override {
        return ValidationResult::rejected(HoldViolation::HoldLocked);
    }

    ValidationResult::ok()
}

/// Validates a hold duration literal.
///
/// A missing duration is accepted; the default of 24h applies.
#[must_use]
pub fn validate_hold_duration(duration: Option<&str>) -> ValidationResult {
    let Some(duration) = duration.filter(|d| !d.is_empty()) else {
        return ValidationResult::ok_with_warning(format!(
            "No duration specified, defaulting to {}",
            HoldDuration::default()
        ));
    };

    if duration.parse::<HoldDuration>().is_err() {
        return ValidationResult::rejected(HoldViolation::InvalidDuration);
    }

    ValidationResult::ok()
}

/// Checks one `:`-separated time field: exactly two digits, at most `max`.
fn two_digit_field(field: &str, max: u8) -> bool {
    field.len() == 2
        && field.bytes().all(|b| b.is_ascii_digit())
        && field.parse::<u8>().is_ok_and(|v| v <= max)
}

/// Validates a hold start time.
///
/// Accepts `H:MM`, `HH:MM` and `HH:MM:SS` on a 24-hour clock. A missing
/// start time is accepted; [`DEFAULT_START_TIME`] applies.
#[must_use]
pub fn validate_start_time(start_time: Option<&str>) -> ValidationResult {
    let Some(start_time) = start_time.filter(|t| !t.is_empty()) else {
        return ValidationResult::ok_with_warning(format!(
            "No start time specified, defaulting to {DEFAULT_START_TIME}"
        ));
    };

    let fields: Vec<&str> = start_time.split(':').collect();
    let well_formed: bool = match fields.as_slice() {
        [hour, minute, rest @ ..] if rest.len() <= 1 => {
            let hour_ok: bool = (1..=2).contains(&hour.len())
                && hour.bytes().all(|b| b.is_ascii_digit())
                && hour.parse::<u8>().is_ok_and(|h| h <= 23);
            hour_ok
                && two_digit_field(minute, 59)
                && rest.iter().all(|second| two_digit_field(second, 59))
        }
        _ => false,
    };

    if !well_formed {
        return ValidationResult::rejected(HoldViolation::InvalidStartTime);
    }

    ValidationResult::ok()
}
