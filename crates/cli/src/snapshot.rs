// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use holdlist::State;
use holdlist_audit::AuditEvent;
use holdlist_domain::Shift;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything the command line keeps between runs: one shift's hold list
/// and its activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: State,
    #[serde(default)]
    pub activity: Vec<AuditEvent>,
}

impl Snapshot {
    pub const fn new(shift: Shift) -> Self {
        Self {
            state: State::new(shift),
            activity: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "No hold list at {}; create one with `holdlist init --shift <A|B|C>`",
                path.display()
            );
        }
        let raw: String = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).wrap_err_with(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json: String = self.to_json()?;
        fs::write(path, json).wrap_err_with(|| format!("Failed to write {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        let mut json: String = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Picks an unused hold id for a firefighter and date.
    pub fn next_hold_id(&self, firefighter_id: &str, hold_date: &str) -> String {
        let base: String = format!("hold-{firefighter_id}-{}", holdlist_domain::date_portion(hold_date));
        (1_u32..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| self.state.find_hold(id).is_none())
            .unwrap_or(base)
    }
}
