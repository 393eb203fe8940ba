// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AlnError;

/// What to do when two blocks of the same sequence claim the same position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// The block found later in the file overwrites the earlier one.
    #[default]
    LastWriteWins,
    /// Any overlap aborts assembly.
    Reject,
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverlapPolicy::LastWriteWins => "last-write-wins",
            OverlapPolicy::Reject => "reject",
        };
        write!(f, "{}", s)
    }
}

// 2^30 cells, i.e. 4 GiB of table.
pub const DEFAULT_MAX_CELLS: usize = 1 << 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    pub overlap: OverlapPolicy,
    /// Largest table (positions x sequences) that assembly will allocate.
    pub max_cells: usize,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        AssemblyConfig {
            overlap: OverlapPolicy::default(),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl AssemblyConfig {
    pub fn from_value(value: &Value) -> Result<Self, AlnError> {
        if !value.is_object() {
            return Err(format!("Assembly config must be a JSON object, got {}", value).into());
        }
        Ok(AssemblyConfig::deserialize(value)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AlnError> {
        let text = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Self::from_value(&value)
    }
}
