// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text hold list suitable for a text message.

use crate::types::RosterEntry;

/// Label used when the caller does not name the shift.
pub const DEFAULT_SHIFT_LABEL: &str = "C-shift";

/// Renders the available members in rotation order, one per line.
///
/// Each line reads `<name> <M/D of last hold or "Not yet"> Station #<station or ?>`.
#[must_use]
pub fn format_hold_list_message(entries: &[RosterEntry], shift_label: &str) -> String {
    let mut available: Vec<&RosterEntry> = entries.iter().filter(|e| e.is_available).collect();
    available.sort_by_key(|e| e.order_position);

    let header: String = format!("Hold list {shift_label} hold list:");
    if available.is_empty() {
        return format!("{header}\n\nNo firefighters currently in rotation.");
    }

    let lines: Vec<String> = available
        .iter()
        .map(|e| {
            let last_hold: String = e.last_hold_date.map_or_else(
                || String::from("Not yet"),
                |d| format!("{}/{}", u8::from(d.month()), d.day()),
            );
            let station: &str = e
                .fire_station
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("?");
            format!("{} {last_hold} Station #{station}", e.name)
        })
        .collect();

    format!("{header}\n\n{}", lines.join("\n"))
}
