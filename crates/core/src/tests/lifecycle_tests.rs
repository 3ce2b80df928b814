// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{complete, rotation_ids, run, run_at, schedule};
use crate::{Command, State, TransitionResult};
use holdlist_audit::AuditEvent;
use holdlist_domain::Shift;
use time::macros::datetime;

fn roster_of_three() -> State {
    let mut state: State = State::new(Shift::A);
    for (id, name) in [("ff-1", "Ana Ruiz"), ("ff-2", "Ben Okafor"), ("ff-3", "Cal Singh")] {
        let command: Command = Command::AddFirefighter {
            id: id.to_string(),
            name: name.to_string(),
            fire_station: String::from("5"),
        };
        state = run(&state, command).unwrap().new_state;
    }
    state
}

#[test]
fn test_full_rotation_returns_to_start() {
    let mut state: State = roster_of_three();
    let mut log: Vec<AuditEvent> = Vec::new();

    for (n, day) in ["2026-03-10", "2026-03-11", "2026-03-12"].iter().enumerate() {
        let next: String = state.next_up().unwrap().id;
        let hold_id: String = format!("h-{n}");
        let scheduled: TransitionResult = run(&state, schedule(&hold_id, &next, day)).unwrap();
        let completed: TransitionResult = run(&scheduled.new_state, complete(&hold_id)).unwrap();
        log.push(scheduled.audit_event);
        log.push(completed.audit_event);
        state = completed.new_state;
    }

    assert_eq!(rotation_ids(&state), vec!["ff-1", "ff-2", "ff-3"]);
    assert_eq!(state.holds.len(), 3);
    assert_eq!(log.len(), 6);
    assert_eq!(
        log[1].summary(),
        "completed_hold: Ana Ruiz - Completed hold and moved to position 3"
    );
}

#[test]
fn test_skip_then_complete_next_in_line() {
    let state: State = roster_of_three();
    let scheduled: TransitionResult = run(&state, schedule("h-1", "ff-1", "2026-03-11")).unwrap();
    let skipped: TransitionResult = run(
        &scheduled.new_state,
        Command::SkipHold {
            hold_id: String::from("h-1"),
            notes: Some(String::from("Swapped with ff-2")),
        },
    )
    .unwrap();
    assert_eq!(skipped.new_state.next_up().unwrap().id, "ff-1");

    let second: TransitionResult =
        run(&skipped.new_state, schedule("h-2", "ff-2", "2026-03-11")).unwrap();
    let done: TransitionResult = run(&second.new_state, complete("h-2")).unwrap();

    assert_eq!(rotation_ids(&done.new_state), vec!["ff-1", "ff-3", "ff-2"]);
}

#[test]
fn test_snapshots_describe_before_and_after() {
    let state: State = roster_of_three();

    let result: TransitionResult = run_at(
        &state,
        schedule("h-1", "ff-1", "2026-03-11"),
        datetime!(2026-03-10 23:30 -05:00),
    )
    .unwrap();

    assert_eq!(
        result.audit_event.before.data,
        "shift=A,roster=3,active=3,holds=0,next=ff-1"
    );
    assert_eq!(
        result.audit_event.after.data,
        "shift=A,roster=3,active=3,holds=1,next=ff-1"
    );
    assert_eq!(
        result.audit_event.recorded_at,
        datetime!(2026-03-11 04:30 UTC)
    );
}

#[test]
fn test_local_date_decides_what_is_past() {
    let state: State = roster_of_three();
    let late_evening = datetime!(2026-03-10 23:30 -05:00);

    assert!(run_at(&state, schedule("h-1", "ff-1", "2026-03-10"), late_evening).is_ok());
    assert!(
        run_at(
            &state,
            schedule("h-1", "ff-1", "2026-03-10"),
            late_evening.to_offset(time::UtcOffset::UTC)
        )
        .is_err()
    );
}
