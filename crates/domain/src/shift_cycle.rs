// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Which shift is on duty on a given date.
//!
//! Each shift works 24 hours on and 48 hours off, so the three shifts take
//! one calendar day each in turn: A, B, C, A, ...

use crate::types::Shift;
use time::Date;
use time::macros::date;

/// A date on which shift A is known to be working.
pub const ROTATION_ANCHOR: Date = date!(2025 - 01 - 01);

/// Returns the shift working on `day`.
///
/// Dates before [`ROTATION_ANCHOR`] cycle backwards consistently.
#[must_use]
pub fn shift_for_date(day: Date) -> Shift {
    let offset: i64 = (day - ROTATION_ANCHOR).whole_days();
    match offset.rem_euclid(3) {
        0 => Shift::A,
        1 => Shift::B,
        _ => Shift::C,
    }
}

/// Returns true if `shift` is on duty on `day`.
#[must_use]
pub fn is_shift_working(day: Date, shift: Shift) -> bool {
    shift_for_date(day) == shift
}
