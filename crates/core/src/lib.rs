// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hold list state transitions.
//!
//! [`apply`] takes the current [`State`] and a [`Command`] and returns the
//! next state together with the [`holdlist_audit::AuditEvent`] describing the
//! change. [`transfer_shift`] moves a firefighter between two shifts' hold
//! lists. Inputs are never mutated.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;
mod transfer;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{State, TransferResult, TransitionResult};
pub use transfer::transfer_shift;
