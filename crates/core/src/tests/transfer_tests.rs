// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    NOW, create_test_actor, create_test_cause, create_test_state, hold, positions,
};
use crate::{CoreError, State, TransferResult, transfer_shift};
use holdlist_audit::ActivityKind;
use holdlist_domain::{DomainError, HoldStatus, RosterEntry, Shift};
use time::macros::date;

/// Shift B with two firefighters in order ff-7, ff-8.
fn create_b_shift() -> State {
    let mut state: State = State::new(Shift::B);
    state.roster = vec![
        RosterEntry::new("ff-7", "Gus Lind", Shift::B, 0),
        RosterEntry::new("ff-8", "Hana Ito", Shift::B, 1),
    ];
    state
}

fn transfer(source: &State, destination: &State, id: &str) -> Result<TransferResult, CoreError> {
    transfer_shift(
        source,
        destination,
        id,
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
}

#[test]
fn test_transfer_places_firefighter_at_bottom_of_new_shift() {
    let mut source: State = create_test_state();
    source.roster[0].last_hold_date = Some(date!(2026 - 03 - 01));
    source
        .holds
        .push(hold("h-1", "ff-1", "2026-03-01", HoldStatus::Completed));
    let destination: State = create_b_shift();

    let result: TransferResult = transfer(&source, &destination, "ff-1").unwrap();

    assert_eq!(
        positions(&result.destination),
        vec![
            (String::from("ff-7"), 0),
            (String::from("ff-8"), 1),
            (String::from("ff-1"), 2)
        ]
    );
    let moved: &RosterEntry = result.destination.find_firefighter("ff-1").unwrap();
    assert_eq!(moved.shift, Shift::B);
    assert_eq!(moved.last_hold_date, None);
    assert_eq!(moved.name, "Ana Ruiz");
    assert_eq!(moved.fire_station.as_deref(), Some("1"));

    assert_eq!(
        positions(&result.source),
        vec![(String::from("ff-2"), 0), (String::from("ff-3"), 1)]
    );
    assert_eq!(result.source.holds.len(), 1);
    assert!(result.destination.holds.is_empty());
    assert_eq!(source.roster.len(), 3);
}

#[test]
fn test_transfer_records_shift_change() {
    let source: State = create_test_state();
    let destination: State = create_b_shift();

    let result: TransferResult = transfer(&source, &destination, "ff-2").unwrap();

    assert_eq!(result.audit_event.action.kind, ActivityKind::ShiftTransfer);
    assert_eq!(
        result.audit_event.action.details.as_deref(),
        Some("Transferred from Shift A to Shift B (placed at end)")
    );
    assert_eq!(
        result.audit_event.subject.unwrap().firefighter_id,
        String::from("ff-2")
    );
    assert_eq!(result.audit_event.recorded_at, NOW);
}

#[test]
fn test_transfer_joins_ahead_of_unavailable_members() {
    let source: State = create_test_state();
    let mut destination: State = create_b_shift();
    destination.roster[1].is_available = false;

    let result: TransferResult = transfer(&source, &destination, "ff-3").unwrap();

    assert_eq!(
        positions(&result.destination),
        vec![
            (String::from("ff-7"), 0),
            (String::from("ff-3"), 1),
            (String::from("ff-8"), 2)
        ]
    );
}

#[test]
fn test_transfer_rejects_same_shift() {
    let source: State = create_test_state();
    let destination: State = State::new(Shift::A);

    let err: CoreError = transfer(&source, &destination, "ff-1").unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::AlreadyOnShift { id, shift })
            if id == "ff-1" && shift == "A"
    ));
}

#[test]
fn test_transfer_rejects_unknown_inactive_and_duplicate() {
    let mut source: State = create_test_state();
    source.roster[1].is_active = false;
    let mut destination: State = create_b_shift();
    destination
        .roster
        .push(RosterEntry::new("ff-3", "Cal Singh", Shift::B, 2));

    assert!(matches!(
        transfer(&source, &destination, "ff-9").unwrap_err(),
        CoreError::DomainViolation(DomainError::FirefighterNotFound { .. })
    ));
    assert!(matches!(
        transfer(&source, &destination, "ff-2").unwrap_err(),
        CoreError::DomainViolation(DomainError::FirefighterInactive { .. })
    ));
    assert!(matches!(
        transfer(&source, &destination, "ff-3").unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateFirefighter { .. })
    ));
}
