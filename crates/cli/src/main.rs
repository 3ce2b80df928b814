// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # holdlist
//!
//! Operator tool for a shift's hold rotation. The hold list and its
//! activity log live in one JSON file (`--data`). Read-only commands print
//! views of it; every other command goes through [`holdlist::apply`] and
//! appends one entry to the activity log.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod clock;
mod render;
mod snapshot;

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use holdlist::{State, TransferResult, TransitionResult};
use holdlist_audit::{Actor, Cause};
use holdlist_domain::{Shift, parse_calendar_date, plan_rotation, shift_for_date};
use time::{Date, OffsetDateTime};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_log::AsTrace;

use crate::snapshot::Snapshot;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "holdlist", version, about = "Manage a shift's firefighter hold rotation")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Hold list file
    #[arg(long, short = 'd', global = true, default_value = "holdlist.json")]
    data: PathBuf,

    /// Department timezone, used to decide what "today" is
    #[arg(long, global = true, default_value = "UTC")]
    timezone: String,

    /// Who is making the change, recorded in the activity log
    #[arg(long, global = true, default_value = "operator")]
    actor: String,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        let tz = clock::parse_timezone(&self.timezone)?;
        let now: OffsetDateTime = clock::local_now(tz, chrono::Utc::now())?;
        debug!("Department time is {} ({})", now, tz);

        let actor: Actor = Actor::new(self.actor, String::from("operator"));
        let cause: Cause = Cause::new(
            format!("cli-{}", now.unix_timestamp()),
            String::from("holdlist command line"),
        );

        match self.command {
            Command::Init { shift } => return init(&self.data, shift),
            Command::Transfer { firefighter, to } => {
                let mut source: Snapshot = Snapshot::load(&self.data)?;
                let mut destination: Snapshot = Snapshot::load(&to)?;
                transfer(&mut source, &mut destination, &firefighter, actor, cause, now)?;
                destination.save(&to)?;
                return source.save(&self.data);
            }
            _ => (),
        }

        let mut snapshot: Snapshot = Snapshot::load(&self.data)?;
        match self.command.into_hold_command(&snapshot, now.date())? {
            Request::Read(view) => {
                print!("{view}");
                Ok(())
            }
            Request::Change(command) => {
                record(&mut snapshot, command, actor, cause, now)?;
                snapshot.save(&self.data)
            }
        }
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Start a new, empty hold list file
    Init {
        #[arg(long)]
        shift: Shift,
    },

    /// Show the rotation and upcoming holds
    #[command(visible_alias = "s")]
    Show,

    /// Show who is next up for a hold
    #[command(visible_alias = "n")]
    Next,

    /// Print the hold list as a text message
    #[command(visible_alias = "m")]
    Message {
        /// Shift name used in the header, e.g. "C-shift"
        #[arg(long)]
        label: Option<String>,
    },

    /// Project who holds on each of the coming days
    #[command(visible_alias = "p")]
    Plan {
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// First day of the plan; defaults to today
        #[arg(long)]
        start: Option<String>,
    },

    /// Show which shift works on a date
    ShiftFor {
        #[arg(long)]
        date: String,
    },

    /// Show the most recent activity log entries
    #[command(visible_alias = "l")]
    Log {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Schedule a hold
    Schedule {
        /// Hold id; generated from the firefighter and date when omitted
        #[arg(long)]
        hold: Option<String>,
        #[arg(long)]
        firefighter: String,
        #[arg(long)]
        date: String,
        /// Station worked; defaults to the firefighter's station
        #[arg(long)]
        station: Option<String>,
        /// Shift the firefighter is lent to
        #[arg(long)]
        lend_to: Option<String>,
        /// 12h or 24h
        #[arg(long)]
        duration: Option<String>,
        /// HH:MM, 24-hour clock
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Mark a hold worked and rotate the firefighter
    Complete {
        #[arg(long)]
        hold: String,
        /// 1-based position to place the firefighter at instead of the bottom
        #[arg(long)]
        position: Option<usize>,
        #[arg(long)]
        admin_override: bool,
    },

    /// Skip a scheduled hold
    Skip {
        #[arg(long)]
        hold: String,
        #[arg(long)]
        notes: String,
    },

    /// Remove a hold
    Cancel {
        #[arg(long)]
        hold: String,
        #[arg(long)]
        admin_override: bool,
    },

    /// Move a scheduled hold to another date
    Reschedule {
        #[arg(long)]
        hold: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        admin_override: bool,
    },

    /// Add a firefighter at the bottom of the rotation
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        station: String,
    },

    /// Mark a firefighter available or unavailable
    #[command(group(ArgGroup::new("status").required(true).args(["available", "unavailable"])))]
    Availability {
        #[arg(long)]
        firefighter: String,
        #[arg(long)]
        available: bool,
        #[arg(long)]
        unavailable: bool,
    },

    /// Take a firefighter off the hold list
    Deactivate {
        #[arg(long)]
        firefighter: String,
    },

    /// Put a deactivated firefighter back at the top
    Reactivate {
        #[arg(long)]
        firefighter: String,
    },

    /// Delete a firefighter; their past holds stay on the calendar
    Remove {
        #[arg(long)]
        firefighter: String,
    },

    /// Move a firefighter to the bottom of another shift's hold list
    Transfer {
        #[arg(long)]
        firefighter: String,
        /// Hold list file of the receiving shift
        #[arg(long)]
        to: PathBuf,
    },

    /// Set the rotation order
    Reorder {
        /// Every active firefighter id, comma separated, in the new order
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },
}

/// What a subcommand asks for once the hold list is loaded.
#[derive(Debug)]
enum Request {
    Read(String),
    Change(holdlist::Command),
}

impl Command {
    fn into_hold_command(self, snapshot: &Snapshot, today: Date) -> Result<Request> {
        let state: &State = &snapshot.state;
        let request: Request = match self {
            Self::Init { .. } => bail!("Hold list is already initialized"),
            Self::Transfer { .. } => bail!("Transfer needs both hold list files"),
            Self::Show => Request::Read(render::roster(state, today)),
            Self::Next => Request::Read(format!("{}\n", render::next_up(state))),
            Self::Message { label } => {
                let label: String = label.unwrap_or_else(|| format!("{}-shift", state.shift));
                Request::Read(format!(
                    "{}\n",
                    holdlist_domain::format_hold_list_message(&state.rotation(), &label)
                ))
            }
            Self::Plan { days, start } => {
                let start: Date = match start {
                    Some(raw) => parse_calendar_date(&raw)?,
                    None => today,
                };
                Request::Read(render::plan(&plan_rotation(&state.rotation(), start, days)))
            }
            Self::ShiftFor { date } => {
                let day: Date = parse_calendar_date(&date)?;
                Request::Read(format!("{} is a {}-shift day\n", day, shift_for_date(day)))
            }
            Self::Log { limit } => Request::Read(render::activity(&snapshot.activity, limit)),
            Self::Schedule {
                hold,
                firefighter,
                date,
                station,
                lend_to,
                duration,
                start_time,
                notes,
            } => Request::Change(holdlist::Command::ScheduleHold {
                hold_id: hold.unwrap_or_else(|| snapshot.next_hold_id(&firefighter, &date)),
                firefighter_id: firefighter,
                hold_date: date,
                fire_station: station,
                lent_to_shift: lend_to,
                duration,
                start_time,
                notes,
            }),
            Self::Complete {
                hold,
                position,
                admin_override,
            } => Request::Change(holdlist::Command::CompleteHold {
                hold_id: hold,
                new_position: position,
                admin_override,
            }),
            Self::Skip { hold, notes } => Request::Change(holdlist::Command::SkipHold {
                hold_id: hold,
                notes: Some(notes),
            }),
            Self::Cancel {
                hold,
                admin_override,
            } => Request::Change(holdlist::Command::CancelHold {
                hold_id: hold,
                admin_override,
            }),
            Self::Reschedule {
                hold,
                date,
                admin_override,
            } => Request::Change(holdlist::Command::RescheduleHold {
                hold_id: hold,
                hold_date: date,
                admin_override,
            }),
            Self::Add { id, name, station } => Request::Change(holdlist::Command::AddFirefighter {
                id,
                name,
                fire_station: station,
            }),
            Self::Availability {
                firefighter,
                available,
                unavailable,
            } => Request::Change(holdlist::Command::SetAvailability {
                firefighter_id: firefighter,
                available: available && !unavailable,
            }),
            Self::Deactivate { firefighter } => {
                Request::Change(holdlist::Command::DeactivateFirefighter {
                    firefighter_id: firefighter,
                })
            }
            Self::Reactivate { firefighter } => {
                Request::Change(holdlist::Command::ReactivateFirefighter {
                    firefighter_id: firefighter,
                })
            }
            Self::Remove { firefighter } => {
                Request::Change(holdlist::Command::RemoveFirefighter {
                    firefighter_id: firefighter,
                })
            }
            Self::Reorder { ids } => Request::Change(holdlist::Command::ReorderRoster {
                ordered_ids: ids.into_iter().map(|id| id.trim().to_string()).collect(),
            }),
        };
        Ok(request)
    }
}

fn init(path: &Path, shift: Shift) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    Snapshot::new(shift).save(path)?;
    info!("Created shift {} hold list at {}", shift, path.display());
    Ok(())
}

/// Applies a command to the snapshot and appends its activity log entry.
fn record(
    snapshot: &mut Snapshot,
    command: holdlist::Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<()> {
    let result: TransitionResult = holdlist::apply(&snapshot.state, command, actor, cause, now)
        .wrap_err("Hold list was not changed")?;

    for warning in &result.warnings {
        warn!("{warning}");
    }
    info!("{}", result.audit_event.summary());

    snapshot.state = result.new_state;
    snapshot.activity.push(result.audit_event);
    Ok(())
}

/// Moves a firefighter between two hold lists and logs the move in both.
fn transfer(
    source: &mut Snapshot,
    destination: &mut Snapshot,
    firefighter_id: &str,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<()> {
    let result: TransferResult = holdlist::transfer_shift(
        &source.state,
        &destination.state,
        firefighter_id,
        actor,
        cause,
        now,
    )
    .wrap_err("Hold lists were not changed")?;

    info!("{}", result.audit_event.summary());

    source.state = result.source;
    destination.state = result.destination;
    source.activity.push(result.audit_event.clone());
    destination.activity.push(result.audit_event);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use holdlist_audit::ActivityKind;
    use time::macros::{date, datetime};

    const NOW: OffsetDateTime = datetime!(2026-03-10 08:00 -05:00);

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("holdlist").chain(args.iter().copied())).unwrap()
    }

    fn apply_args(snapshot: &mut Snapshot, args: &[&str]) -> Result<()> {
        let parsed: Args = parse(args);
        match parsed.command.into_hold_command(snapshot, NOW.date())? {
            Request::Change(command) => record(
                snapshot,
                command,
                Actor::new(parsed.actor, String::from("operator")),
                Cause::new(String::from("test"), String::from("test")),
                NOW,
            ),
            Request::Read(_) => panic!("expected a change"),
        }
    }

    fn view(snapshot: &Snapshot, args: &[&str]) -> String {
        match parse(args)
            .command
            .into_hold_command(snapshot, NOW.date())
            .unwrap()
        {
            Request::Read(text) => text,
            Request::Change(_) => panic!("expected a view"),
        }
    }

    fn crew() -> Snapshot {
        let mut snapshot: Snapshot = Snapshot::new(Shift::C);
        for (id, name, station) in [
            ("ff-1", "Ana Ruiz", "1"),
            ("ff-2", "Ben Okafor", "2"),
            ("ff-3", "Cal Singh", "3"),
        ] {
            apply_args(
                &mut snapshot,
                &["add", "--id", id, "--name", name, "--station", station],
            )
            .unwrap();
        }
        snapshot
    }

    #[test]
    fn test_schedule_and_complete_from_arguments() {
        let mut snapshot: Snapshot = crew();

        apply_args(
            &mut snapshot,
            &["--actor", "capt-ray", "schedule", "--firefighter", "ff-1", "--date", "2026-03-12"],
        )
        .unwrap();
        apply_args(&mut snapshot, &["complete", "--hold", "hold-ff-1-2026-03-12-1"]).unwrap();

        assert_eq!(snapshot.activity.len(), 5);
        let last = snapshot.activity.last().unwrap();
        assert_eq!(last.action.kind, ActivityKind::CompletedHold);
        assert_eq!(last.actor.id, "operator");
        assert_eq!(snapshot.activity[3].actor.id, "capt-ray");
        assert_eq!(
            view(&snapshot, &["next"]),
            "Next up: Ben Okafor (ff-2) Station #2, last hold never\n"
        );
    }

    #[test]
    fn test_rejected_change_leaves_snapshot_alone() {
        let mut snapshot: Snapshot = crew();
        let before: Snapshot = snapshot.clone();

        let err = apply_args(
            &mut snapshot,
            &["schedule", "--firefighter", "ff-1", "--date", "2026-03-01"],
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("Cannot schedule hold in the past"));
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_message_uses_shift_label() {
        let snapshot: Snapshot = crew();

        let text: String = view(&snapshot, &["message"]);

        assert!(text.starts_with("Hold list C-shift hold list:\n\nAna Ruiz Not yet Station #1\n"));
        assert!(view(&snapshot, &["message", "--label", "Night"]).starts_with("Hold list Night"));
    }

    #[test]
    fn test_availability_flags() {
        let mut snapshot: Snapshot = crew();

        apply_args(
            &mut snapshot,
            &["availability", "--firefighter", "ff-1", "--unavailable"],
        )
        .unwrap();
        assert!(!snapshot.state.find_firefighter("ff-1").unwrap().is_available);

        assert!(
            Args::try_parse_from(["holdlist", "availability", "--firefighter", "ff-1"]).is_err()
        );
    }

    #[test]
    fn test_reorder_takes_comma_list() {
        let mut snapshot: Snapshot = crew();

        apply_args(&mut snapshot, &["reorder", "--ids", "ff-3, ff-1,ff-2"]).unwrap();

        let order: Vec<String> = snapshot.state.rotation().into_iter().map(|e| e.id).collect();
        assert_eq!(order, vec!["ff-3", "ff-1", "ff-2"]);
    }

    #[test]
    fn test_remove_keeps_hold_history() {
        let mut snapshot: Snapshot = crew();
        apply_args(
            &mut snapshot,
            &["schedule", "--firefighter", "ff-2", "--date", "2026-03-12"],
        )
        .unwrap();

        apply_args(&mut snapshot, &["remove", "--firefighter", "ff-2"]).unwrap();

        assert!(snapshot.state.find_firefighter("ff-2").is_none());
        assert_eq!(snapshot.state.holds[0].firefighter_name, "Ben Okafor");
        assert_eq!(
            snapshot.activity.last().unwrap().action.kind,
            ActivityKind::Removed
        );
    }

    #[test]
    fn test_transfer_logs_in_both_files() {
        let mut source: Snapshot = crew();
        let mut destination: Snapshot = Snapshot::new(Shift::A);
        let parsed: Args = parse(&["transfer", "--firefighter", "ff-1", "--to", "a-shift.json"]);
        let Command::Transfer { firefighter, to } = parsed.command else {
            panic!("expected a transfer");
        };
        assert_eq!(to, PathBuf::from("a-shift.json"));

        transfer(
            &mut source,
            &mut destination,
            &firefighter,
            Actor::new(parsed.actor, String::from("operator")),
            Cause::new(String::from("test"), String::from("test")),
            NOW,
        )
        .unwrap();

        assert!(source.state.find_firefighter("ff-1").is_none());
        assert_eq!(
            destination.state.find_firefighter("ff-1").unwrap().shift,
            Shift::A
        );
        assert_eq!(
            source.activity.last().unwrap().action.kind,
            ActivityKind::ShiftTransfer
        );
        assert_eq!(destination.activity.len(), 1);
    }

    #[test]
    fn test_shift_for_date() {
        let snapshot: Snapshot = crew();

        assert_eq!(
            view(&snapshot, &["shift-for", "--date", "2025-01-02"]),
            "2025-01-02 is a B-shift day\n"
        );
        assert_eq!(shift_for_date(date!(2025 - 01 - 01)), Shift::A);
    }

    #[test]
    fn test_plan_wraps_around() {
        let snapshot: Snapshot = crew();

        let text: String = view(&snapshot, &["plan", "--days", "4", "--start", "2026-03-10"]);

        assert_eq!(
            text,
            "2026-03-10 Tue  Ana Ruiz\n2026-03-11 Wed  Ben Okafor\n2026-03-12 Thu  Cal Singh\n2026-03-13 Fri  Ana Ruiz\n"
        );
    }
}
