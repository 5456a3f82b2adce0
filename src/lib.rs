//! `queue-log-report` ingests pipe-delimited call-queue log files, normalizes them
//! into a fixed five-column [`types::Report`], and exports the result as an OOXML
//! spreadsheet or a UTF-8 (BOM) CSV — plus a small upload-and-preview web UI.
//!
//! The library entrypoint is [`ingest::parse_queue_log`] (or
//! [`ingest::generate_report`], which also loads the event translation table):
//!
//! ```no_run
//! use queue_log_report::export::{export, ExportFormat};
//! use queue_log_report::ingest::parse_queue_log;
//! use queue_log_report::translate::EventTable;
//!
//! # fn main() -> Result<(), queue_log_report::ReportError> {
//! let events = EventTable::load_or_empty("eventos.json");
//! let report = parse_queue_log("uploads/queue.log", &events)?;
//! let bytes = export(&report, ExportFormat::Csv)?;
//! println!("rows={} bytes={}", report.row_count(), bytes.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: line-to-record parsing and normalization pipeline
//! - [`translate`]: event-code translation table (`eventos.json`)
//! - [`export`]: in-memory CSV/XLSX serialization
//! - [`web`]: axum router for upload, preview and download
//! - [`types`]: report data model
//! - [`error`]: error types used across the crate

pub mod error;
pub mod export;
pub mod ingest;
pub mod translate;
pub mod types;
pub mod web;

pub use error::{ReportError, ReportResult};
