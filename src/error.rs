use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Error type returned by parsing, translation and export functions.
///
/// This is a single error enum shared across the queue-log pipeline. A per-row
/// timestamp that fails to parse is *not* an error (the derived field is simply
/// absent); only infrastructure-level failures surface here.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet serialization error.
    #[error("xlsx error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    /// The event translation table could not be loaded.
    ///
    /// Returned by [`crate::translate::EventTable::load`]; callers that want the
    /// degrade-to-no-translation behavior use
    /// [`crate::translate::EventTable::load_or_empty`], which absorbs this.
    #[error("failed to load event table from '{path}': {message}")]
    Translation { path: PathBuf, message: String },

    /// An export format string that is neither `excel` nor `csv`.
    #[error("unknown export format '{raw}' (expected 'excel' or 'csv')")]
    UnknownFormat { raw: String },
}
