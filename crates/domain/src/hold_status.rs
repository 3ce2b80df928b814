// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hold status and its transition rules.
//!
//! A hold starts out `scheduled` and is resolved exactly once, either to
//! `completed` or to `skipped`. Completed holds are final. A skipped hold can
//! only be turned into a completed one by an administrator.

use crate::error::{DomainError, HoldViolation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a scheduled hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldStatus {
    /// Assigned to a date and not yet worked.
    Scheduled,
    /// Worked. The owning firefighter has rotated to the bottom.
    Completed,
    /// Passed over; notes explain why.
    Skipped,
}

impl HoldStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Scheduled, Self::Completed, Self::Skipped];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        }
    }

    /// Returns true if no transition out of this status is ever permitted.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Staying in the same status is always permitted.
    ///
    /// # Errors
    ///
    /// Returns the violated rule if the transition is not allowed.
    pub const fn validate_transition(
        &self,
        new_status: Self,
        admin_override: bool,
    ) -> Result<(), HoldViolation> {
        match (self, new_status) {
            (Self::Scheduled, Self::Scheduled)
            | (Self::Completed, Self::Completed)
            | (Self::Skipped, Self::Skipped)
            | (Self::Scheduled, Self::Completed | Self::Skipped) => Ok(()),
            (Self::Completed, _) => Err(HoldViolation::CompletedHoldIsFinal),
            (Self::Skipped, Self::Completed) if admin_override => Ok(()),
            (Self::Skipped, _) => Err(HoldViolation::SkippedHoldRequiresOverride),
        }
    }
}

impl FromStr for HoldStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "skipped" => Ok(Self::Skipped),
            _ => Err(DomainError::InvalidHoldStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for HoldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_its_own_string() {
        for status in HoldStatus::ALL {
            let s = status.as_str();
            match s.parse::<HoldStatus>() {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        let result = "cancelled".parse::<HoldStatus>();
        assert!(matches!(
            result,
            Err(DomainError::InvalidHoldStatus { status }) if status == "cancelled"
        ));
    }

    #[test]
    fn test_only_completed_is_terminal() {
        assert!(!HoldStatus::Scheduled.is_terminal());
        assert!(HoldStatus::Completed.is_terminal());
        assert!(!HoldStatus::Skipped.is_terminal());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&HoldStatus::Skipped).unwrap_or_default();
        assert_eq!(json, "\"skipped\"");
    }
}
