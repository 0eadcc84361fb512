use super::loader::SiigoLoader;
use super::types::*;
use super::utils::*;
use crate::error::AppError;

/// Summarizes what the loader sees at the configured header row, without
/// rejecting exports that lack required columns.
pub fn preview_export(file_data: &[u8], header_row: usize, sample_size: usize) -> Result<SheetPreview, AppError> {
    let raw = SiigoLoader::new(header_row).read_sheet(file_data)?;

    let sample_data: Vec<Vec<String>> = raw.rows.iter()
        .take(sample_size)
        .map(|(_, row)| row.iter().map(cell_to_string).collect())
        .collect();

    let missing_columns = missing_columns(&raw.headers);
    if !missing_columns.is_empty() {
        tracing::warn!("Preview of {} is missing columns: {:?}", raw.sheet_name, missing_columns);
    }

    Ok(SheetPreview {
        has_third_party_column: raw.headers.iter().any(|h| h == THIRD_PARTY_NAME),
        sheet_names: raw.sheet_names,
        sheet_name: raw.sheet_name,
        header_row,
        row_count: raw.rows.len(),
        columns: raw.headers,
        sample_data,
        missing_columns,
    })
}
