// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod hold_status;
mod message;
mod rotation;
mod shift_cycle;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DomainError, HoldViolation};
pub use hold_status::HoldStatus;
pub use message::{DEFAULT_SHIFT_LABEL, format_hold_list_message};
pub use rotation::{
    assign_positions, complete_and_renumber, move_to_bottom, next_available, next_position,
    place_at, place_at_top, plan_rotation, recalculate_positions, sort_roster,
};
pub use shift_cycle::{ROTATION_ANCHOR, is_shift_working, shift_for_date};

// Re-export public types
pub use types::{
    HoldDuration, RosterEntry, ScheduledHold, Shift, date_portion, format_calendar_date,
    parse_calendar_date,
};
pub use validation::{
    DEFAULT_START_TIME, FIRE_STATION_RANGE, HOLD_LOCK_DAYS, MAX_DAYS_IN_ADVANCE,
    MAX_HOLDS_PER_WEEK, ValidationResult, WORK_HOUR_LIMIT, WORK_HOUR_WARNING_BAND,
    is_hold_locked, validate_72_hour_rule, validate_fire_station, validate_firefighter_for_hold,
    validate_hold_date, validate_hold_duration, validate_hold_editable, validate_hold_notes,
    validate_lent_to_shift, validate_schedule_conflict, validate_start_time,
    validate_status_transition,
};
