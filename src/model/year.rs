//! Resolved publication year.

use serde::{Deserialize, Serialize};

/// Where a resolved year came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "era")]
pub enum YearSource {
    /// A plain four-digit Western year embedded in the date string.
    Western,
    /// Converted from `<era><regnal>年` via the era table; carries the era name.
    Era(String),
}

/// A Western calendar year derived from a raw date string.
///
/// `suspect` marks years outside the dataset's plausible span. A suspect year
/// is still a year — distinct from "no temporal data" — so downstream
/// consumers can choose to discard or flag it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedYear {
    pub year: i32,
    pub source: YearSource,
    pub suspect: bool,
}

impl ResolvedYear {
    pub fn new(year: i32, source: YearSource) -> Self {
        Self { year, source, suspect: false }
    }

    pub fn suspect(mut self) -> Self {
        self.suspect = true;
        self
    }
}

impl std::fmt::Display for ResolvedYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.year)?;
        if self.suspect {
            write!(f, "?")?;
        }
        Ok(())
    }
}
