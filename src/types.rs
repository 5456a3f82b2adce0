//! Core data model for the normalized queue-log report.
//!
//! A parsed file becomes a [`Report`]: an ordered list of [`NormalizedRow`]s with a
//! fixed five-column shape. Columns a source line did not carry are `None`, and a
//! column only shows up in previews/exports if at least one row carries it.

use chrono::NaiveDateTime;

/// Display format for the derived human-readable timestamp.
pub const FECHA_LEGIBLE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of rows shown in the HTML preview.
pub const PREVIEW_ROWS: usize = 20;

/// The five output columns, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Raw first field of the line (epoch seconds as written).
    Timestamp,
    /// Human-readable local time derived from [`Column::Timestamp`].
    FechaLegible,
    /// Queue name (third field).
    Cola,
    /// Event code, translated when the event table knows it (fifth field).
    Evento,
    /// Phone number (seventh field).
    NumeroTelefono,
}

impl Column {
    /// All columns in export order.
    pub const ALL: [Column; 5] = [
        Column::Timestamp,
        Column::FechaLegible,
        Column::Cola,
        Column::Evento,
        Column::NumeroTelefono,
    ];

    /// Header name used in CSV/XLSX output and the HTML preview.
    pub fn name(self) -> &'static str {
        match self {
            Column::Timestamp => "timestamp",
            Column::FechaLegible => "fecha_legible",
            Column::Cola => "cola",
            Column::Evento => "evento",
            Column::NumeroTelefono => "numero_telefono",
        }
    }
}

/// One normalized row of the report.
///
/// Fixed-arity on purpose: the five retained columns are explicit optional fields
/// rather than a dynamic `col0..colN` map, so short lines cost nothing and long
/// lines cannot inflate the schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedRow {
    /// Raw first field. Always present for a non-empty line.
    pub timestamp: String,
    /// Local calendar time derived from `timestamp`; `None` when the field is not
    /// a parseable epoch.
    pub fecha_legible: Option<NaiveDateTime>,
    /// Queue name, when the line had at least 3 fields.
    pub cola: Option<String>,
    /// Event label (translated) or raw code, when the line had at least 5 fields.
    pub evento: Option<String>,
    /// Phone number, when the line had at least 7 fields.
    pub numero_telefono: Option<String>,
}

impl NormalizedRow {
    /// Cell value for `column`, rendered as it appears in exports.
    ///
    /// Absent cells and unparseable timestamps render as `None`.
    pub fn cell(&self, column: Column) -> Option<String> {
        match column {
            Column::Timestamp => Some(self.timestamp.clone()),
            Column::FechaLegible => self
                .fecha_legible
                .map(|dt| dt.format(FECHA_LEGIBLE_FORMAT).to_string()),
            Column::Cola => self.cola.clone(),
            Column::Evento => self.evento.clone(),
            Column::NumeroTelefono => self.numero_telefono.clone(),
        }
    }

    fn carries(&self, column: Column) -> bool {
        match column {
            // fecha_legible is derived for every row, even when derivation failed.
            Column::Timestamp | Column::FechaLegible => true,
            Column::Cola => self.cola.is_some(),
            Column::Evento => self.evento.is_some(),
            Column::NumeroTelefono => self.numero_telefono.is_some(),
        }
    }
}

/// In-memory normalized report, in input line order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    /// Normalized rows, one per non-empty input line.
    pub rows: Vec<NormalizedRow>,
}

impl Report {
    /// Create a report from already-normalized rows.
    pub fn new(rows: Vec<NormalizedRow>) -> Self {
        Self { rows }
    }

    /// Number of rows in the report.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns that appear in exports and the preview, in export order.
    ///
    /// A column is present when at least one row carries it. An empty report
    /// exposes all five columns so an export still produces a header row.
    pub fn columns(&self) -> Vec<Column> {
        if self.rows.is_empty() {
            return Column::ALL.to_vec();
        }
        Column::ALL
            .into_iter()
            .filter(|&c| self.rows.iter().any(|r| r.carries(c)))
            .collect()
    }

    /// The first `PREVIEW_ROWS` rows, for the HTML preview.
    pub fn preview(&self) -> &[NormalizedRow] {
        let n = self.rows.len().min(PREVIEW_ROWS);
        &self.rows[..n]
    }
}
