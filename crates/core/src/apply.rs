// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{State, TransitionResult};
use holdlist_audit::{Action, ActivityKind, Actor, AuditEvent, Cause, Subject};
use holdlist_domain::{
    DEFAULT_START_TIME, DomainError, HoldDuration, HoldStatus, HoldViolation, RosterEntry,
    ScheduledHold, Shift, ValidationResult, assign_positions, complete_and_renumber,
    date_portion, next_position, place_at, place_at_top, recalculate_positions,
    validate_72_hour_rule, validate_fire_station, validate_firefighter_for_hold,
    validate_hold_date, validate_hold_duration, validate_hold_editable, validate_hold_notes,
    validate_lent_to_shift, validate_schedule_conflict, validate_start_time,
    validate_status_transition,
};
use std::collections::HashSet;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

/// What a single command changed, before it is wrapped in an audit event.
struct Change {
    new_state: State,
    action: Action,
    subject: Option<Subject>,
    warnings: Vec<String>,
}

/// Applies a command to the current state, producing a new state and an audit event.
///
/// This is a pure function: the input state is not modified. "Today" for
/// date rules is the calendar date of `now`, so callers pass `now` in the
/// department's local offset.
///
/// # Arguments
///
/// * `state` - The current hold list (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The reference clock for date and lock rules
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, audit event and any warnings
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command references an unknown firefighter or hold
/// - A hold rule rejects the change
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let name: &str = command.name();
    debug!("Applying {} to shift {} hold list", name, state.shift);

    let change: Change = match apply_command(state, command, now) {
        Ok(change) => change,
        Err(err) => {
            warn!("{} rejected: {}", name, err);
            return Err(err);
        }
    };

    for warning in &change.warnings {
        debug!("{}: {}", name, warning);
    }

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        change.action,
        change.subject,
        state.to_snapshot(),
        change.new_state.to_snapshot(),
        now,
    );

    Ok(TransitionResult {
        new_state: change.new_state,
        audit_event,
        warnings: change.warnings,
    })
}

fn apply_command(state: &State, command: Command, now: OffsetDateTime) -> Result<Change, CoreError> {
    match command {
        Command::ScheduleHold {
            hold_id,
            firefighter_id,
            hold_date,
            fire_station,
            lent_to_shift,
            duration,
            start_time,
            notes,
        } => schedule_hold(
            state,
            hold_id,
            &firefighter_id,
            &hold_date,
            HoldOptions {
                fire_station,
                lent_to_shift,
                duration,
                start_time,
                notes,
            },
            now,
        ),
        Command::CompleteHold {
            hold_id,
            new_position,
            admin_override,
        } => complete_hold(state, &hold_id, new_position, admin_override, now),
        Command::SkipHold { hold_id, notes } => skip_hold(state, &hold_id, notes),
        Command::CancelHold {
            hold_id,
            admin_override,
        } => cancel_hold(state, &hold_id, admin_override, now),
        Command::RescheduleHold {
            hold_id,
            hold_date,
            admin_override,
        } => reschedule_hold(state, &hold_id, &hold_date, admin_override, now),
        Command::AddFirefighter {
            id,
            name,
            fire_station,
        } => add_firefighter(state, &id, &name, &fire_station),
        Command::SetAvailability {
            firefighter_id,
            available,
        } => set_availability(state, &firefighter_id, available),
        Command::DeactivateFirefighter { firefighter_id } => {
            deactivate_firefighter(state, &firefighter_id)
        }
        Command::ReactivateFirefighter { firefighter_id } => {
            reactivate_firefighter(state, &firefighter_id)
        }
        Command::RemoveFirefighter { firefighter_id } => {
            remove_firefighter(state, &firefighter_id)
        }
        Command::ReorderRoster { ordered_ids } => reorder_roster(state, &ordered_ids),
    }
}

/// Optional fields of a new hold, as entered.
struct HoldOptions {
    fire_station: Option<String>,
    lent_to_shift: Option<String>,
    duration: Option<String>,
    start_time: Option<String>,
    notes: Option<String>,
}

/// Lifts a validation outcome into the command's result, collecting warnings.
fn check(result: ValidationResult, warnings: &mut Vec<String>) -> Result<(), CoreError> {
    if let Some(warning) = result.into_result()? {
        warnings.push(warning);
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require_hold<'a>(state: &'a State, hold_id: &str) -> Result<&'a ScheduledHold, CoreError> {
    state.find_hold(hold_id).ok_or_else(|| {
        CoreError::DomainViolation(DomainError::HoldNotFound {
            id: hold_id.to_string(),
        })
    })
}

fn require_firefighter<'a>(state: &'a State, id: &str) -> Result<&'a RosterEntry, CoreError> {
    state.find_firefighter(id).ok_or_else(|| {
        CoreError::DomainViolation(DomainError::FirefighterNotFound { id: id.to_string() })
    })
}

fn subject_of(hold: &ScheduledHold) -> Subject {
    Subject {
        firefighter_id: hold.firefighter_id.clone(),
        firefighter_name: hold.firefighter_name.clone(),
    }
}

fn hold_mut<'a>(state: &'a mut State, hold_id: &str) -> Option<&'a mut ScheduledHold> {
    state.holds.iter_mut().find(|h| h.id == hold_id)
}

fn entry_mut<'a>(state: &'a mut State, id: &str) -> Option<&'a mut RosterEntry> {
    state.roster.iter_mut().find(|e| e.id == id)
}

fn schedule_hold(
    state: &State,
    hold_id: String,
    firefighter_id: &str,
    hold_date: &str,
    options: HoldOptions,
    now: OffsetDateTime,
) -> Result<Change, CoreError> {
    if state.find_hold(&hold_id).is_some() {
        return Err(DomainError::DuplicateHold { id: hold_id }.into());
    }

    let today: Date = now.date();
    let mut warnings: Vec<String> = Vec::new();

    let firefighter: Option<&RosterEntry> = state.find_firefighter(firefighter_id);
    check(
        validate_firefighter_for_hold(firefighter, &state.holds, today),
        &mut warnings,
    )?;
    let Some(firefighter) = firefighter else {
        return Err(HoldViolation::FirefighterNotFound.into());
    };

    check(validate_hold_date(hold_date, today), &mut warnings)?;
    check(
        validate_schedule_conflict(&state.holds, &firefighter.id, hold_date),
        &mut warnings,
    )?;

    let fire_station: Option<String> =
        non_blank(options.fire_station).or_else(|| firefighter.fire_station.clone());
    check(validate_fire_station(fire_station.as_deref()), &mut warnings)?;
    check(
        validate_lent_to_shift(firefighter.shift, options.lent_to_shift.as_deref()),
        &mut warnings,
    )?;
    check(
        validate_hold_duration(options.duration.as_deref()),
        &mut warnings,
    )?;
    check(
        validate_start_time(options.start_time.as_deref()),
        &mut warnings,
    )?;
    check(
        validate_hold_notes(HoldStatus::Scheduled, options.notes.as_deref()),
        &mut warnings,
    )?;

    let duration: HoldDuration = non_blank(options.duration)
        .map(|d| d.parse::<HoldDuration>())
        .transpose()?
        .unwrap_or_default();
    let lent_to_shift: Option<Shift> = non_blank(options.lent_to_shift)
        .map(|s| s.parse::<Shift>())
        .transpose()?;
    check(validate_72_hour_rule(firefighter, duration), &mut warnings)?;

    let day: String = date_portion(hold_date).to_string();
    let details: String = format!(
        "Scheduled {duration} hold for {day} at Station #{}",
        fire_station.as_deref().unwrap_or("?")
    );

    let hold: ScheduledHold = ScheduledHold {
        id: hold_id,
        firefighter_id: firefighter.id.clone(),
        firefighter_name: firefighter.name.clone(),
        hold_date: day,
        status: HoldStatus::Scheduled,
        shift: firefighter.shift,
        fire_station,
        lent_to_shift,
        notes: non_blank(options.notes),
        duration: Some(duration),
        start_time: Some(
            non_blank(options.start_time).unwrap_or_else(|| DEFAULT_START_TIME.to_string()),
        ),
        created_at: now,
        completed_at: None,
    };

    let subject: Subject = Subject::from_entry(firefighter);
    let mut new_state: State = state.clone();
    new_state.holds.push(hold);

    Ok(Change {
        new_state,
        action: Action::new(ActivityKind::HoldScheduled, Some(details)),
        subject: Some(subject),
        warnings,
    })
}

fn complete_hold(
    state: &State,
    hold_id: &str,
    new_position: Option<usize>,
    admin_override: bool,
    now: OffsetDateTime,
) -> Result<Change, CoreError> {
    let hold: &ScheduledHold = require_hold(state, hold_id)?;
    if hold.status == HoldStatus::Completed {
        return Err(DomainError::HoldAlreadyInStatus {
            id: hold_id.to_string(),
            status: hold.status.to_string(),
        }
        .into());
    }

    let mut warnings: Vec<String> = Vec::new();
    check(
        validate_status_transition(hold.status, HoldStatus::Completed, admin_override),
        &mut warnings,
    )?;
    let hold_date: Date = hold.calendar_date()?;
    let firefighter_id: &str = &hold.firefighter_id;

    let mut new_state: State = state.clone();
    if let Some(h) = hold_mut(&mut new_state, hold_id) {
        h.status = HoldStatus::Completed;
        h.completed_at = Some(now);
    }
    if let Some(entry) = entry_mut(&mut new_state, firefighter_id) {
        entry.last_hold_date = Some(entry.last_hold_date.map_or(hold_date, |d| d.max(hold_date)));
    }

    let rotates: bool = state
        .find_firefighter(firefighter_id)
        .is_some_and(RosterEntry::is_eligible);
    let details: String = if rotates {
        new_state.reorder_active(|active| match new_position {
            Some(position) => place_at(active, firefighter_id, position),
            None => complete_and_renumber(active, firefighter_id),
        });
        let position: u32 = new_state
            .find_firefighter(firefighter_id)
            .map_or(0, |e| e.order_position + 1);
        info!(
            "{} completed hold {} and moved to position {}",
            hold.firefighter_name, hold_id, position
        );
        format!("Completed hold and moved to position {position}")
    } else {
        info!(
            "{} completed hold {}; not in the active rotation",
            hold.firefighter_name, hold_id
        );
        String::from("Completed hold; rotation unchanged")
    };

    Ok(Change {
        new_state,
        action: Action::new(ActivityKind::CompletedHold, Some(details)),
        subject: Some(subject_of(hold)),
        warnings,
    })
}

fn skip_hold(state: &State, hold_id: &str, notes: Option<String>) -> Result<Change, CoreError> {
    let hold: &ScheduledHold = require_hold(state, hold_id)?;
    if hold.status == HoldStatus::Skipped {
        return Err(DomainError::HoldAlreadyInStatus {
            id: hold_id.to_string(),
            status: hold.status.to_string(),
        }
        .into());
    }

    let mut warnings: Vec<String> = Vec::new();
    check(
        validate_status_transition(hold.status, HoldStatus::Skipped, false),
        &mut warnings,
    )?;
    check(
        validate_hold_notes(HoldStatus::Skipped, notes.as_deref()),
        &mut warnings,
    )?;
    let notes: Option<String> = non_blank(notes);
    let details: String = format!(
        "Skipped hold for {}: {}",
        hold.hold_day(),
        notes.as_deref().unwrap_or_default()
    );

    let mut new_state: State = state.clone();
    if let Some(h) = hold_mut(&mut new_state, hold_id) {
        h.status = HoldStatus::Skipped;
        h.notes = notes;
    }

    Ok(Change {
        new_state,
        action: Action::new(ActivityKind::HoldSkipped, Some(details)),
        subject: Some(subject_of(hold)),
        warnings,
    })
}

fn cancel_hold(
    state: &State,
    hold_id: &str,
    admin_override: bool,
    now: OffsetDateTime,
) -> Result<Change, CoreError> {
    let hold: &ScheduledHold = require_hold(state, hold_id)?;
    let mut warnings: Vec<String> = Vec::new();
    if hold.status != HoldStatus::Scheduled {
        check(
            validate_hold_editable(hold, admin_override, now),
            &mut warnings,
        )?;
    }

    let details: String = format!("Cancelled {} hold for {}", hold.status, hold.hold_day());
    let mut new_state: State = state.clone();
    new_state.holds.retain(|h| h.id != hold_id);

    Ok(Change {
        new_state,
        action: Action::new(ActivityKind::HoldCancelled, Some(details)),
        subject: Some(subject_of(hold)),
        warnings,
    })
}

fn reschedule_hold(
    state: &State,
    hold_id: &str,
    hold_date: &str,
    admin_override: bool,
    now: OffsetDateTime,
) -> Result<Change, CoreError> {
    let hold: &ScheduledHold = require_hold(state, hold_id)?;
    if hold.status != HoldStatus::Scheduled {
        return Err(DomainError::HoldNotScheduled {
            id: hold_id.to_string(),
            status: hold.status.to_string(),
        }
        .into());
    }

    let mut warnings: Vec<String> = Vec::new();
    check(
        validate_hold_editable(hold, admin_override, now),
        &mut warnings,
    )?;
    check(validate_hold_date(hold_date, now.date()), &mut warnings)?;
    let others: Vec<ScheduledHold> = state
        .holds
        .iter()
        .filter(|h| h.id != hold_id)
        .cloned()
        .collect();
    check(
        validate_schedule_conflict(&others, &hold.firefighter_id, hold_date),
        &mut warnings,
    )?;

    let day: String = date_portion(hold_date).to_string();
    let details: String = format!("Rescheduled hold from {} to {day}", hold.hold_day());
    let mut new_state: State = state.clone();
    if let Some(h) = hold_mut(&mut new_state, hold_id) {
        h.hold_date = day;
    }

    Ok(Change {
        new_state,
        action: Action::new(ActivityKind::HoldRescheduled, Some(details)),
        subject: Some(subject_of(hold)),
        warnings,
    })
}

fn add_firefighter(
    state: &State,
    id: &str,
    name: &str,
    fire_station: &str,
) -> Result<Change, CoreError> {
    let id: &str = id.trim();
    let name: &str = name.trim();
    if id.is_empty() {
        return Err(DomainError::InvalidName(String::from("id must not be empty")).into());
    }
    if name.is_empty() {
        return Err(DomainError::InvalidName(String::from("name must not be empty")).into());
    }
    if state.find_firefighter(id).is_some() {
        return Err(DomainError::DuplicateFirefighter { id: id.to_string() }.into());
    }

    let mut warnings: Vec<String> = Vec::new();
    check(validate_fire_station(Some(fire_station)), &mut warnings)?;

    let mut entry: RosterEntry =
        RosterEntry::new(id, name, state.shift, next_position(&state.rotation()));
    entry.fire_station = Some(fire_station.trim().to_string());
    let subject: Subject = Subject::from_entry(&entry);

    let mut new_state: State = state.clone();
    new_state.reorder_active(|active| {
        let mut roster: Vec<RosterEntry> = active.to_vec();
        roster.push(entry);
        recalculate_positions(&roster)
    });
    let position: u32 = new_state
        .find_firefighter(id)
        .map_or(0, |e| e.order_position);

    Ok(Change {
        new_state,
        action: Action::new(
            ActivityKind::Added,
            Some(format!("Added to hold list at position {}", position + 1)),
        ),
        subject: Some(subject),
        warnings,
    })
}

fn set_availability(
    state: &State,
    firefighter_id: &str,
    available: bool,
) -> Result<Change, CoreError> {
    let entry: &RosterEntry = require_firefighter(state, firefighter_id)?;
    if !entry.is_active {
        return Err(DomainError::FirefighterInactive {
            id: firefighter_id.to_string(),
        }
        .into());
    }

    let mut new_state: State = state.clone();
    if let Some(e) = entry_mut(&mut new_state, firefighter_id) {
        e.is_available = available;
    }
    new_state.reorder_active(recalculate_positions);

    let details: &str = if available {
        "Marked available"
    } else {
        "Marked unavailable"
    };

    Ok(Change {
        new_state,
        action: Action::new(ActivityKind::AvailabilityChanged, Some(details.to_string())),
        subject: Some(Subject::from_entry(entry)),
        warnings: Vec::new(),
    })
}

fn deactivate_firefighter(state: &State, firefighter_id: &str) -> Result<Change, CoreError> {
    let entry: &RosterEntry = require_firefighter(state, firefighter_id)?;
    if !entry.is_active {
        return Err(DomainError::FirefighterInactive {
            id: firefighter_id.to_string(),
        }
        .into());
    }

    let mut new_state: State = state.clone();
    if let Some(e) = entry_mut(&mut new_state, firefighter_id) {
        e.is_active = false;
    }
    new_state.reorder_active(recalculate_positions);

    Ok(Change {
        new_state,
        action: Action::new(
            ActivityKind::Deactivated,
            Some(String::from("Removed from hold list")),
        ),
        subject: Some(Subject::from_entry(entry)),
        warnings: Vec::new(),
    })
}

fn reactivate_firefighter(state: &State, firefighter_id: &str) -> Result<Change, CoreError> {
    let entry: &RosterEntry = require_firefighter(state, firefighter_id)?;
    if entry.is_active {
        return Err(DomainError::FirefighterAlreadyActive {
            id: firefighter_id.to_string(),
        }
        .into());
    }

    let returning: RosterEntry = RosterEntry {
        is_active: true,
        is_available: true,
        ..entry.clone()
    };

    let mut new_state: State = state.clone();
    new_state.roster.retain(|e| e.id != firefighter_id);
    new_state.reorder_active(|active| place_at_top(active, returning));

    Ok(Change {
        new_state,
        action: Action::new(
            ActivityKind::Reactivated,
            Some(String::from("Reactivated at position 1")),
        ),
        subject: Some(Subject::from_entry(entry)),
        warnings: Vec::new(),
    })
}

fn remove_firefighter(state: &State, firefighter_id: &str) -> Result<Change, CoreError> {
    let entry: &RosterEntry = require_firefighter(state, firefighter_id)?;

    let mut new_state: State = state.clone();
    new_state.roster.retain(|e| e.id != firefighter_id);
    new_state.reorder_active(recalculate_positions);

    Ok(Change {
        new_state,
        action: Action::new(
            ActivityKind::Removed,
            Some(String::from(
                "Removed from rotation (hold history preserved)",
            )),
        ),
        subject: Some(Subject::from_entry(entry)),
        warnings: Vec::new(),
    })
}

fn reorder_roster(state: &State, ordered_ids: &[String]) -> Result<Change, CoreError> {
    let active: Vec<RosterEntry> = state.rotation();
    let invalid = |reason: String| -> CoreError {
        CoreError::DomainViolation(DomainError::InvalidRosterOrder { reason })
    };

    if ordered_ids.len() != active.len() {
        return Err(invalid(format!(
            "expected {} active firefighters, got {}",
            active.len(),
            ordered_ids.len()
        )));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut ordered: Vec<RosterEntry> = Vec::with_capacity(ordered_ids.len());
    for id in ordered_ids {
        if !seen.insert(id.as_str()) {
            return Err(invalid(format!("'{id}' is listed more than once")));
        }
        let Some(entry) = active.iter().find(|e| e.id == *id) else {
            return Err(invalid(format!("'{id}' is not an active firefighter")));
        };
        ordered.push(entry.clone());
    }

    // Unavailable members keep the given order but stay behind the available ones.
    let mut new_state: State = state.clone();
    new_state.reorder_active(|_| recalculate_positions(&assign_positions(&ordered)));

    Ok(Change {
        new_state,
        action: Action::new(
            ActivityKind::RosterReordered,
            Some(String::from("Hold list order set manually")),
        ),
        subject: None,
        warnings: Vec::new(),
    })
}
