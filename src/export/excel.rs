//! XLSX export implementation.

use rust_xlsxwriter::Workbook;

use crate::error::ReportResult;
use crate::types::Report;

/// Serialize `report` as a single-sheet OOXML workbook, entirely in memory.
///
/// Sheet name is `Reporte`, row 0 is the header, every cell is written as a
/// string (timestamps keep their rendered form).
pub fn export_excel(report: &Report) -> ReportResult<Vec<u8>> {
    let columns = report.columns();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Reporte")?;

    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, column.name())?;
    }
    for (idx, row) in report.rows.iter().enumerate() {
        let excel_row = (idx + 1) as u32;
        for (col, &column) in columns.iter().enumerate() {
            if let Some(value) = row.cell(column) {
                worksheet.write_string(excel_row, col as u16, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
