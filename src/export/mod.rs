//! Report export.
//!
//! Serializes a [`Report`] to an in-memory byte stream, never to disk:
//!
//! - [`csv`]: UTF-8 CSV with a leading byte-order mark
//! - [`excel`]: OOXML workbook with a single "Reporte" sheet
//!
//! [`export`] dispatches on [`ExportFormat`]; unrecognized format strings are
//! rejected by [`ExportFormat::parse`] rather than silently defaulting.

pub mod csv;
pub mod excel;

use crate::error::{ReportError, ReportResult};
use crate::types::Report;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// OOXML spreadsheet (`.xlsx`).
    Excel,
    /// UTF-8 CSV with BOM.
    Csv,
}

impl ExportFormat {
    /// Parse a format from its URL segment (case-insensitive).
    pub fn parse(raw: &str) -> ReportResult<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "excel" => Ok(Self::Excel),
            "csv" => Ok(Self::Csv),
            _ => Err(ReportError::UnknownFormat {
                raw: raw.to_string(),
            }),
        }
    }

    /// Download file name for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Excel => "reporte.xlsx",
            Self::Csv => "reporte.csv",
        }
    }

    /// MIME type for HTTP responses.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::Csv => "text/csv",
        }
    }
}

/// Serialize `report` in the requested format, returning the raw bytes.
pub fn export(report: &Report, format: ExportFormat) -> ReportResult<Vec<u8>> {
    match format {
        ExportFormat::Excel => excel::export_excel(report),
        ExportFormat::Csv => csv::export_csv(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_formats_case_insensitively() {
        assert_eq!(ExportFormat::parse("excel").unwrap(), ExportFormat::Excel);
        assert_eq!(ExportFormat::parse("CSV").unwrap(), ExportFormat::Csv);
    }

    #[test]
    fn parse_rejects_unknown_format() {
        let err = ExportFormat::parse("pdf").unwrap_err();
        assert!(err.to_string().contains("unknown export format 'pdf'"));
    }
}
