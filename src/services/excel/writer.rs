use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use crate::error::AppError;
use crate::models::{ReportRow, ReportTable, REPORT_HEADERS};

/// Serializes a report into an in-memory `.xlsx`.
pub fn write_report(table: &ReportTable) -> Result<Vec<u8>, AppError> {
    let file_name = table.kind.file_name();
    build_workbook(table)
        .map_err(|e| {
            tracing::error!("Failed to write {}: {}", file_name, e);
            AppError::WriteFailed { file: file_name.clone(), message: e.to_string() }
        })
        .map(|bytes| {
            tracing::info!("Wrote {} ({} rows, {}KB)", file_name, table.rows.len(), bytes.len() / 1024);
            bytes
        })
}

fn build_workbook(table: &ReportTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(table.kind.sheet_name())?;

    let header_format = Format::new().set_bold();
    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        write_row(worksheet, idx as u32 + 1, row)?;
    }

    worksheet.autofit();
    workbook.save_to_buffer()
}

fn write_row(worksheet: &mut Worksheet, sheet_row: u32, row: &ReportRow) -> Result<(), XlsxError> {
    let texts = [
        &row.mes,
        &row.estado,
        &row.anio,
        &row.centro_costos,
        &row.clase,
        &row.grupo,
        &row.subgrupo,
        &row.cuenta,
        &row.tercero,
    ];

    // Blank values stay as empty cells.
    for (col, text) in texts.into_iter().enumerate() {
        if !text.is_empty() {
            worksheet.write_string(sheet_row, col as u16, text.as_str())?;
        }
    }

    if let Some(valor) = row.valor {
        worksheet.write_number(sheet_row, texts.len() as u16, valor)?;
    }

    Ok(())
}
