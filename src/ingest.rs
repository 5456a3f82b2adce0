//! Queue-log ingestion and normalization.
//!
//! Input is pipe-delimited text, one record per line, positional columns, with an
//! epoch-seconds integer expected (not required) in the first field:
//!
//! ```text
//! 1700000000|1700000000.17|soporte|SIP/104|CONNECT|5|5551234
//! ```
//!
//! [`parse_queue_log`] turns such a file into a [`Report`]. The pipeline is
//! deliberately forgiving: invalid UTF-8 bytes are dropped, short lines just leave
//! trailing columns absent, and an unparseable first field leaves `fecha_legible`
//! empty instead of failing the row. Only real I/O failures return an error.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime, TimeZone};
use unicode_normalization::UnicodeNormalization;

use crate::error::ReportResult;
use crate::translate::EventTable;
use crate::types::{NormalizedRow, Report};

/// Positional source columns retained by normalization.
const IDX_TIMESTAMP: usize = 0;
const IDX_COLA: usize = 2;
const IDX_EVENTO: usize = 4;
const IDX_NUMERO_TELEFONO: usize = 6;

/// Parse a queue-log file into a normalized [`Report`].
///
/// Rows come out in input line order; empty (after trimming) lines are skipped.
/// Parsing the same file twice yields identical reports.
pub fn parse_queue_log(path: impl AsRef<Path>, events: &EventTable) -> ReportResult<Report> {
    let bytes = fs::read(path)?;
    let text = decode_dropping_invalid(&bytes);
    Ok(parse_queue_log_str(&text, events))
}

/// Parse already-decoded queue-log text. Infallible: every line normalizes.
pub fn parse_queue_log_str(text: &str, events: &EventTable) -> Report {
    let rows = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| normalize_line(line, events))
        .collect();
    Report::new(rows)
}

/// Load the event table from `events_path` (degrading to no translation on
/// failure) and parse `path`. This is what request handlers call per request;
/// nothing is cached between calls.
pub fn generate_report(
    path: impl AsRef<Path>,
    events_path: impl AsRef<Path>,
) -> ReportResult<Report> {
    let events = EventTable::load_or_empty(events_path);
    parse_queue_log(path, &events)
}

fn normalize_line(line: &str, events: &EventTable) -> NormalizedRow {
    let fields: Vec<String> = line.split('|').map(normalize_field).collect();

    let field = |idx: usize| fields.get(idx).cloned();

    // A non-empty line always has a first field, even without any delimiter.
    let timestamp = field(IDX_TIMESTAMP).unwrap_or_default();
    let fecha_legible = legible_timestamp(&timestamp);
    let evento = field(IDX_EVENTO)
        .map(|code| events.label(&code).map(str::to_owned).unwrap_or(code));

    NormalizedRow {
        timestamp,
        fecha_legible,
        cola: field(IDX_COLA),
        evento,
        numero_telefono: field(IDX_NUMERO_TELEFONO),
    }
}

/// Trim and canonically compose (NFC) a raw field.
fn normalize_field(raw: &str) -> String {
    raw.trim().nfc().collect()
}

/// Interpret `raw` as epoch seconds and convert to local calendar time.
///
/// Returns `None` for anything non-numeric or outside chrono's representable
/// range; the failure never escalates past the absent field.
pub fn legible_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let secs: i64 = raw.parse().ok()?;
    Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|dt| dt.naive_local())
}

/// Decode bytes as UTF-8, dropping invalid sequences instead of replacing them.
fn decode_dropping_invalid(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let valid_up_to = e.valid_up_to();
                // Safe split: everything before the error offset is valid UTF-8.
                out.push_str(std::str::from_utf8(&bytes[..valid_up_to]).unwrap_or(""));
                let skip = e.error_len().unwrap_or(bytes.len() - valid_up_to);
                bytes = &bytes[valid_up_to + skip..];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legible_timestamp_rejects_non_numeric() {
        assert_eq!(legible_timestamp("abc"), None);
        assert_eq!(legible_timestamp(""), None);
        assert_eq!(legible_timestamp("17.5"), None);
    }

    #[test]
    fn legible_timestamp_converts_epoch_seconds() {
        let expected = Local
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap()
            .naive_local();
        assert_eq!(legible_timestamp("1700000000"), Some(expected));
    }

    #[test]
    fn decode_drops_invalid_bytes() {
        let bytes = b"cola|\xffagente|fin";
        assert_eq!(decode_dropping_invalid(bytes), "cola|agente|fin");
    }

    #[test]
    fn normalize_field_composes_nfc() {
        // 'e' + combining acute accent composes to a single scalar.
        assert_eq!(normalize_field(" e\u{0301}xito "), "\u{e9}xito");
    }
}
