// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::{State, TransferResult};
use holdlist_audit::{Action, ActivityKind, Actor, AuditEvent, Cause, StateSnapshot, Subject};
use holdlist_domain::{DomainError, RosterEntry, next_position, recalculate_positions};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Moves a firefighter from one shift's hold list to another's.
///
/// The firefighter joins the bottom of the destination rotation with no
/// hold history, and the source rotation closes the gap. Holds stay on the
/// source calendar. Neither input is modified.
///
/// # Arguments
///
/// * `source` - The hold list the firefighter is on
/// * `destination` - The hold list of the new shift
/// * `firefighter_id` - The firefighter to move
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - When the transfer is recorded
///
/// # Errors
///
/// Returns an error if:
/// - The firefighter is not on the source roster, or is inactive there
/// - Both hold lists belong to the same shift
/// - The destination already has a firefighter with the same id
pub fn transfer_shift(
    source: &State,
    destination: &State,
    firefighter_id: &str,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransferResult, CoreError> {
    debug!(
        "Transferring {} from shift {} to shift {}",
        firefighter_id, source.shift, destination.shift
    );

    let result: Result<TransferResult, CoreError> =
        plan_transfer(source, destination, firefighter_id, actor, cause, now);
    if let Err(err) = &result {
        warn!("Transfer of {} rejected: {}", firefighter_id, err);
    }
    result
}

fn plan_transfer(
    source: &State,
    destination: &State,
    firefighter_id: &str,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransferResult, CoreError> {
    let entry: &RosterEntry = source.find_firefighter(firefighter_id).ok_or_else(|| {
        DomainError::FirefighterNotFound {
            id: firefighter_id.to_string(),
        }
    })?;
    if !entry.is_active {
        return Err(DomainError::FirefighterInactive {
            id: firefighter_id.to_string(),
        }
        .into());
    }
    if source.shift == destination.shift {
        return Err(DomainError::AlreadyOnShift {
            id: firefighter_id.to_string(),
            shift: source.shift.to_string(),
        }
        .into());
    }
    if destination.find_firefighter(firefighter_id).is_some() {
        return Err(DomainError::DuplicateFirefighter {
            id: firefighter_id.to_string(),
        }
        .into());
    }

    let moved: RosterEntry = RosterEntry {
        shift: destination.shift,
        order_position: next_position(&destination.rotation()),
        last_hold_date: None,
        ..entry.clone()
    };

    let mut new_source: State = source.clone();
    new_source.roster.retain(|e| e.id != firefighter_id);
    new_source.reorder_active(recalculate_positions);

    let mut new_destination: State = destination.clone();
    new_destination.reorder_active(|active| {
        let mut roster: Vec<RosterEntry> = active.to_vec();
        roster.push(moved);
        recalculate_positions(&roster)
    });

    info!(
        "{} transferred from shift {} to shift {}",
        entry.name, source.shift, destination.shift
    );

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            ActivityKind::ShiftTransfer,
            Some(format!(
                "Transferred from Shift {} to Shift {} (placed at end)",
                source.shift, destination.shift
            )),
        ),
        Some(Subject::from_entry(entry)),
        pair_snapshot(source, destination),
        pair_snapshot(&new_source, &new_destination),
        now,
    );

    Ok(TransferResult {
        source: new_source,
        destination: new_destination,
        audit_event,
    })
}

fn pair_snapshot(source: &State, destination: &State) -> StateSnapshot {
    StateSnapshot::new(format!(
        "{} | {}",
        source.to_snapshot().data,
        destination.to_snapshot().data
    ))
}
