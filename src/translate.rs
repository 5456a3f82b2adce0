//! Event-code translation table.
//!
//! Raw queue-log event codes (e.g. `ENTERQUEUE`, `CONNECT`) are mapped to display
//! labels through a JSON object file, conventionally `eventos.json`:
//!
//! ```json
//! { "ENTERQUEUE": "Llamada en cola", "CONNECT": "Atendida" }
//! ```
//!
//! The table is side-loaded config, not data: a missing or malformed file must
//! never break a parse, so [`EventTable::load_or_empty`] logs a warning and keeps
//! going with raw codes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ReportError, ReportResult};

/// Static code→label lookup for event codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTable {
    labels: HashMap<String, String>,
}

impl EventTable {
    /// A table with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(code, label)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load the table from a JSON object file of string→string entries.
    pub fn load(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ReportError::Translation {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let labels: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| ReportError::Translation {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self { labels })
    }

    /// Load the table, degrading to an empty one on any failure.
    ///
    /// The failure is logged as a warning; rows then keep their raw event codes.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("event translation disabled: {e}");
                Self::empty()
            }
        }
    }

    /// Display label for `code`, if the table knows it.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hits_and_misses() {
        let table = EventTable::from_pairs([("EVT1", "Login")]);
        assert_eq!(table.label("EVT1"), Some("Login"));
        assert_eq!(table.label("EVT9"), None);
    }

    #[test]
    fn load_or_empty_absorbs_missing_file() {
        let table = EventTable::load_or_empty("no/such/eventos.json");
        assert!(table.is_empty());
    }
}
