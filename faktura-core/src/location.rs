//! Known merchant locations.
//!
//! The alias file has one entry per line:
//!
//! ```text
//! STOCKHOLM
//! STHLM->STOCKHOLM
//! GBG -> GOTEBORG
//! ```
//!
//! A bare token maps to itself; `ALIAS->CANONICAL` maps the alias.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::LocationTableError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationTable {
    entries: HashMap<String, String>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the alias file format. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, LocationTableError> {
        let mut table = Self::new();

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if line.contains("->") {
                let parts: Vec<&str> = line.split("->").map(str::trim).collect();
                match parts.as_slice() {
                    [alias, canonical] if !alias.is_empty() && !canonical.is_empty() => {
                        table.insert(*alias, *canonical);
                    }
                    _ => {
                        return Err(LocationTableError::InvalidMapEntry {
                            line: i + 1,
                            content: line.to_string(),
                        });
                    }
                }
            } else if line.contains(char::is_whitespace) {
                return Err(LocationTableError::InvalidLocation {
                    line: i + 1,
                    content: line.to_string(),
                });
            } else {
                table.insert(line, line);
            }
        }

        tracing::debug!(entries = table.len(), "parsed location table");
        Ok(table)
    }

    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(alias.into(), canonical.into());
    }

    /// Canonical location for an exact key.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for LocationTable {
    type Err = LocationTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<A: Into<String>, C: Into<String>> FromIterator<(A, C)> for LocationTable {
    fn from_iter<I: IntoIterator<Item = (A, C)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (alias, canonical) in iter {
            table.insert(alias, canonical);
        }
        table
    }
}
