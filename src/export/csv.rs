//! CSV export implementation.

use crate::error::ReportResult;
use crate::types::Report;

/// UTF-8 byte-order mark. Spreadsheet tools sniff it to pick the right encoding.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Serialize `report` as UTF-8 CSV with a leading BOM.
///
/// Header row holds the present column names; absent cells serialize as empty
/// strings; no index column. An empty report yields a header-only stream.
pub fn export_csv(report: &Report) -> ReportResult<Vec<u8>> {
    let columns = report.columns();

    let mut wtr = csv::Writer::from_writer(UTF8_BOM.to_vec());
    wtr.write_record(columns.iter().map(|c| c.name()))?;
    for row in &report.rows {
        wtr.write_record(columns.iter().map(|&c| row.cell(c).unwrap_or_default()))?;
    }

    // IntoInnerError carries the writer; surface the io error it wraps.
    wtr.into_inner().map_err(|e| e.into_error().into())
}
