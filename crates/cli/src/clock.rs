// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department-local time.
//!
//! Hold rules work on calendar days, so "today" has to be the department's
//! day, not the machine's or UTC's.

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use time::{OffsetDateTime, UtcOffset};

/// Parses an IANA timezone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| eyre!("Unknown timezone '{name}'"))
}

/// Expresses a UTC instant in the department's local offset.
pub fn local_now(tz: Tz, utc_now: DateTime<Utc>) -> Result<OffsetDateTime> {
    let offset_seconds: i32 = utc_now.with_timezone(&tz).offset().fix().local_minus_utc();
    let offset: UtcOffset = UtcOffset::from_whole_seconds(offset_seconds)
        .wrap_err_with(|| format!("Offset for {tz} is out of range"))?;
    let instant: OffsetDateTime = OffsetDateTime::from_unix_timestamp(utc_now.timestamp())
        .wrap_err("Current time is out of range")?;
    Ok(instant.to_offset(offset))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::TimeZone;
    use time::macros::date;

    #[test]
    fn test_evening_in_new_york_is_still_the_same_day() {
        let tz: Tz = parse_timezone("America/New_York").unwrap();
        let utc: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 3, 11, 3, 30, 0).unwrap();

        let now: OffsetDateTime = local_now(tz, utc).unwrap();

        assert_eq!(now.date(), date!(2026 - 03 - 10));
        assert_eq!(now.offset().whole_hours(), -4);
        assert_eq!(now.unix_timestamp(), utc.timestamp());
    }

    #[test]
    fn test_utc_keeps_the_utc_day() {
        let tz: Tz = parse_timezone("UTC").unwrap();
        let utc: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 3, 11, 3, 30, 0).unwrap();

        assert_eq!(local_now(tz, utc).unwrap().date(), date!(2026 - 03 - 11));
    }

    #[test]
    fn test_unknown_timezone_is_an_error() {
        assert!(parse_timezone("Mars/Olympus_Mons").is_err());
    }
}
