// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::hold_status::HoldStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// One of the three platoons working the 24-on/48-off cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    A,
    B,
    C,
}

impl Shift {
    /// All shifts in cycle order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Returns the single-letter representation of the shift.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl FromStr for Shift {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(DomainError::InvalidShift(s.to_string())),
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Length of a hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HoldDuration {
    #[serde(rename = "12h")]
    Half,
    #[default]
    #[serde(rename = "24h")]
    Full,
}

impl HoldDuration {
    /// Returns the wire representation (`12h` or `24h`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Half => "12h",
            Self::Full => "24h",
        }
    }

    /// Number of hours worked during a hold of this length.
    #[must_use]
    pub const fn hours(&self) -> u32 {
        match self {
            Self::Half => 12,
            Self::Full => 24,
        }
    }
}

impl FromStr for HoldDuration {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12h" => Ok(Self::Half),
            "24h" => Ok(Self::Full),
            _ => Err(DomainError::InvalidHoldDuration(s.to_string())),
        }
    }
}

impl std::fmt::Display for HoldDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A firefighter's place on the hold rotation.
///
/// `order_position` is only meaningful relative to the other entries of the
/// same shift. Inactive entries are soft-deleted and never take part in the
/// rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub order_position: u32,
    pub is_available: bool,
    pub is_active: bool,
    pub shift: Shift,
    #[serde(default)]
    pub fire_station: Option<String>,
    /// Date of the most recent completed hold.
    #[serde(default, with = "iso_date::option")]
    pub last_hold_date: Option<Date>,
    /// Hours already worked in the current pay period, if tracked.
    #[serde(default)]
    pub hours_worked_this_period: Option<u32>,
}

impl RosterEntry {
    /// Creates an active, available entry with no hold history.
    ///
    /// # Arguments
    ///
    /// * `id` - The entry's identifier
    /// * `name` - Display name
    /// * `shift` - Home shift
    /// * `order_position` - Initial place in the rotation
    #[must_use]
    pub fn new(id: &str, name: &str, shift: Shift, order_position: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            order_position,
            is_available: true,
            is_active: true,
            shift,
            fire_station: None,
            last_hold_date: None,
            hours_worked_this_period: None,
        }
    }

    /// Returns whether this entry can currently be put on a hold.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.is_active && self.is_available
    }
}

/// A hold assignment for one firefighter on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledHold {
    pub id: String,
    /// References a roster entry; many holds point at the same entry over time.
    pub firefighter_id: String,
    /// Kept on the hold so history survives removal of the roster entry.
    pub firefighter_name: String,
    /// `YYYY-MM-DD`, possibly followed by a time component.
    pub hold_date: String,
    pub status: HoldStatus,
    pub shift: Shift,
    /// Station where the hold is worked, which may differ from the home station.
    #[serde(default)]
    pub fire_station: Option<String>,
    #[serde(default)]
    pub lent_to_shift: Option<Shift>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub duration: Option<HoldDuration>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl ScheduledHold {
    /// Returns the date portion of `hold_date`, ignoring any time-of-day.
    #[must_use]
    pub fn hold_day(&self) -> &str {
        date_portion(&self.hold_date)
    }

    /// Parses the date portion of `hold_date`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateParseError` if the date portion is not `YYYY-MM-DD`.
    pub fn calendar_date(&self) -> Result<Date, DomainError> {
        parse_calendar_date(&self.hold_date)
    }
}

/// Returns the `YYYY-MM-DD` part of a stored date, dropping any time component.
///
/// The time may follow a `T` or a space, e.g. `2025-11-20T10:00:00Z` or
/// `2025-11-20 10:00:00`.
#[must_use]
pub fn date_portion(raw: &str) -> &str {
    let raw: &str = raw.trim();
    raw.split(['T', ' ']).next().unwrap_or(raw)
}

/// Parses a stored date, ignoring any time component.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the date portion is not a valid
/// `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(raw: &str) -> Result<Date, DomainError> {
    let day: &str = date_portion(raw);
    Date::parse(day, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: raw.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_calendar_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
