// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use holdlist_domain::{DomainError, HoldViolation};
use thiserror::Error;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The command referenced something that does not fit the current state.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// A hold rule rejected the change.
    #[error("Rejected: {0}")]
    Rejected(#[from] HoldViolation),
}
