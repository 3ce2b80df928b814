// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, CoreError, State, TransitionResult, apply};
use holdlist_audit::{Actor, Cause};
use holdlist_domain::{HoldStatus, RosterEntry, ScheduledHold, Shift};
use time::OffsetDateTime;
use time::macros::datetime;

/// Tuesday morning; the week runs Sunday 2026-03-08 to Saturday 2026-03-14.
pub const NOW: OffsetDateTime = datetime!(2026-03-10 08:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("captain-7"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Morning lineup"))
}

fn firefighter(id: &str, name: &str, station: &str, position: u32) -> RosterEntry {
    let mut entry: RosterEntry = RosterEntry::new(id, name, Shift::A, position);
    entry.fire_station = Some(station.to_string());
    entry
}

/// Shift A with three firefighters in order ff-1, ff-2, ff-3.
pub fn create_test_state() -> State {
    let mut state: State = State::new(Shift::A);
    state.roster = vec![
        firefighter("ff-1", "Ana Ruiz", "1", 0),
        firefighter("ff-2", "Ben Okafor", "2", 1),
        firefighter("ff-3", "Cal Singh", "3", 2),
    ];
    state
}

pub fn hold(id: &str, firefighter_id: &str, hold_date: &str, status: HoldStatus) -> ScheduledHold {
    hold_created_at(id, firefighter_id, hold_date, status, NOW)
}

pub fn hold_created_at(
    id: &str,
    firefighter_id: &str,
    hold_date: &str,
    status: HoldStatus,
    created_at: OffsetDateTime,
) -> ScheduledHold {
    ScheduledHold {
        id: id.to_string(),
        firefighter_id: firefighter_id.to_string(),
        firefighter_name: format!("Name of {firefighter_id}"),
        hold_date: hold_date.to_string(),
        status,
        shift: Shift::A,
        fire_station: Some(String::from("1")),
        lent_to_shift: None,
        notes: None,
        duration: None,
        start_time: None,
        created_at,
        completed_at: None,
    }
}

pub fn schedule(hold_id: &str, firefighter_id: &str, hold_date: &str) -> Command {
    Command::ScheduleHold {
        hold_id: hold_id.to_string(),
        firefighter_id: firefighter_id.to_string(),
        hold_date: hold_date.to_string(),
        fire_station: None,
        lent_to_shift: None,
        duration: None,
        start_time: None,
        notes: None,
    }
}

pub fn complete(hold_id: &str) -> Command {
    Command::CompleteHold {
        hold_id: hold_id.to_string(),
        new_position: None,
        admin_override: false,
    }
}

pub fn run(state: &State, command: Command) -> Result<TransitionResult, CoreError> {
    run_at(state, command, NOW)
}

pub fn run_at(
    state: &State,
    command: Command,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    apply(state, command, create_test_actor(), create_test_cause(), now)
}

pub fn rotation_ids(state: &State) -> Vec<String> {
    state.rotation().into_iter().map(|e| e.id).collect()
}

pub fn positions(state: &State) -> Vec<(String, u32)> {
    state
        .rotation()
        .into_iter()
        .map(|e| (e.id, e.order_position))
        .collect()
}
