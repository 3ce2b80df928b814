// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text views printed by the command line.

use holdlist::State;
use holdlist_audit::AuditEvent;
use holdlist_domain::{HoldStatus, RosterEntry, format_calendar_date};
use std::fmt::Write;
use time::Date;
use time::macros::format_description;

fn describe_entry(entry: &RosterEntry) -> String {
    let station: &str = entry.fire_station.as_deref().unwrap_or("?");
    let last: String = entry
        .last_hold_date
        .map_or_else(|| String::from("never"), format_calendar_date);
    let mut line: String = format!(
        "{} ({}) Station #{station}, last hold {last}",
        entry.name, entry.id
    );
    if !entry.is_available {
        line.push_str(" [unavailable]");
    }
    line
}

/// Rotation order, then upcoming holds.
pub fn roster(state: &State, today: Date) -> String {
    let mut out: String = format!("Shift {} hold list\n", state.shift);
    let rotation: Vec<RosterEntry> = state.rotation();
    if rotation.is_empty() {
        out.push_str("  (nobody on the hold list)\n");
    }
    for (index, entry) in rotation.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", index + 1, describe_entry(entry));
    }

    let inactive: usize = state.roster.iter().filter(|e| !e.is_active).count();
    if inactive > 0 {
        let _ = writeln!(out, "  ({inactive} inactive)");
    }

    let mut upcoming: Vec<_> = state
        .holds
        .iter()
        .filter(|h| h.status == HoldStatus::Scheduled)
        .filter(|h| h.calendar_date().is_ok_and(|d| d >= today))
        .collect();
    upcoming.sort_by(|a, b| a.hold_day().cmp(b.hold_day()));
    if !upcoming.is_empty() {
        out.push_str("\nUpcoming holds\n");
        for hold in upcoming {
            let _ = writeln!(
                out,
                "  {} {} Station #{} [{}]",
                hold.hold_day(),
                hold.firefighter_name,
                hold.fire_station.as_deref().unwrap_or("?"),
                hold.id
            );
        }
    }
    out
}

pub fn next_up(state: &State) -> String {
    state.next_up().map_or_else(
        || String::from("Nobody is available for a hold"),
        |entry| format!("Next up: {}", describe_entry(&entry)),
    )
}

fn day_label(day: Date) -> String {
    day.format(format_description!(
        "[year]-[month]-[day] [weekday repr:short]"
    ))
    .unwrap_or_else(|_| format_calendar_date(day))
}

pub fn plan(days: &[(Date, RosterEntry)]) -> String {
    if days.is_empty() {
        return String::from("Nobody is available for a hold\n");
    }
    days.iter().fold(String::new(), |mut out, (day, entry)| {
        let _ = writeln!(out, "{}  {}", day_label(*day), entry.name);
        out
    })
}

/// Most recent entries last.
pub fn activity(events: &[AuditEvent], limit: usize) -> String {
    let skip: usize = events.len().saturating_sub(limit);
    events
        .iter()
        .skip(skip)
        .fold(String::new(), |mut out, event| {
            let _ = writeln!(
                out,
                "{} {} by {}",
                event.recorded_at.date(),
                event.summary(),
                event.actor.id
            );
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdlist_domain::Shift;
    use time::macros::date;

    fn state() -> State {
        let mut state: State = State::new(Shift::A);
        let mut first: RosterEntry = RosterEntry::new("ff-1", "Ana Ruiz", Shift::A, 0);
        first.fire_station = Some(String::from("3"));
        first.last_hold_date = Some(date!(2026 - 02 - 27));
        let mut second: RosterEntry = RosterEntry::new("ff-2", "Ben Okafor", Shift::A, 1);
        second.is_available = false;
        state.roster = vec![second, first];
        state
    }

    #[test]
    fn test_roster_lists_rotation_order() {
        let text: String = roster(&state(), date!(2026 - 03 - 10));

        assert_eq!(
            text,
            "Shift A hold list\n  1. Ana Ruiz (ff-1) Station #3, last hold 2026-02-27\n  2. Ben Okafor (ff-2) Station #?, last hold never [unavailable]\n"
        );
    }

    #[test]
    fn test_plan_shows_weekday() {
        let entry: RosterEntry = RosterEntry::new("ff-1", "Ana Ruiz", Shift::A, 0);

        let text: String = plan(&[(date!(2026 - 03 - 10), entry)]);

        assert_eq!(text, "2026-03-10 Tue  Ana Ruiz\n");
    }

    #[test]
    fn test_next_up_when_nobody_available() {
        let mut s: State = state();
        s.roster[1].is_available = false;

        assert_eq!(next_up(&s), "Nobody is available for a hold");
    }
}
