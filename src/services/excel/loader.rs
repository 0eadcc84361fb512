use super::types::*;
use super::utils::*;
use std::collections::HashSet;
use std::io::Cursor;
use calamine::{Data, Xlsx, open_workbook_from_rs, Reader};
use crate::error::AppError;
use polars::prelude::*;

/// Reads SIIGO exports whose column headers sit on a fixed sheet row.
pub struct SiigoLoader {
    header_row: usize,
}

impl SiigoLoader {
    pub fn new(header_row: usize) -> Self {
        Self { header_row }
    }

    /// Reads the first worksheet and splits it at the header row, without
    /// checking which columns are present.
    pub fn read_sheet(&self, file_data: &[u8]) -> Result<RawSheet, AppError> {
        let start = std::time::Instant::now();
        let cursor = Cursor::new(file_data);

        let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
            .map_err(|e| {
                tracing::error!("Failed to open Excel file: {}", e);
                AppError::UnreadableWorkbook(format!("Failed to open Excel file: {}", e))
            })?;

        let sheet_names = workbook.sheet_names().to_vec();
        let sheet_name = sheet_names.first()
            .cloned()
            .ok_or_else(|| AppError::UnreadableWorkbook("No sheets found in workbook".to_string()))?;
        tracing::info!("Reading sheet {} ({} sheets in workbook)", sheet_name, sheet_names.len());

        let range = workbook.worksheet_range(&sheet_name)?;

        // Ranges begin at the first used cell, not at A1.
        let (start_row, _) = range.start()
            .ok_or_else(|| AppError::UnreadableWorkbook(format!("Sheet {} is empty", sheet_name)))?;
        let start_row = start_row as usize;
        if self.header_row < start_row {
            return Err(AppError::UnreadableWorkbook(format!(
                "Header row {} is empty in sheet {}",
                self.header_row + 1,
                sheet_name
            )));
        }

        let mut rows = range.rows()
            .enumerate()
            .map(|(offset, row)| (start_row + offset, row))
            .skip(self.header_row - start_row);

        let (_, header_cells) = rows.next().ok_or_else(|| {
            AppError::UnreadableWorkbook(format!(
                "Sheet {} has no row {} to read headers from",
                sheet_name,
                self.header_row + 1
            ))
        })?;

        let mut existing_names = HashSet::new();
        let headers: Vec<String> = header_cells.iter()
            .enumerate()
            .map(|(idx, cell)| unique_column_name(cell_to_string(cell).trim(), idx, &mut existing_names))
            .collect();

        let rows: Vec<(usize, Vec<Data>)> = rows
            .filter(|(_, row)| !is_blank_row(row))
            .map(|(sheet_row, row)| (sheet_row, row.to_vec()))
            .collect();

        tracing::info!(
            "Read {} data rows and {} columns from sheet {} in {:?}",
            rows.len(),
            headers.len(),
            sheet_name,
            start.elapsed()
        );

        Ok(RawSheet {
            sheet_name,
            sheet_names,
            headers,
            rows,
        })
    }

    /// Reads, validates and types the export. The third-party column is
    /// added blank when the export lacks it.
    pub fn load(&self, file_data: &[u8]) -> Result<SourceTable, AppError> {
        let raw = self.read_sheet(file_data)?;

        let missing = missing_columns(&raw.headers);
        if !missing.is_empty() {
            tracing::error!("Sheet {} lacks required columns: {:?}", raw.sheet_name, missing);
            return Err(AppError::MissingColumns(missing));
        }

        let mut frame = create_dataframe(&raw)?;
        ensure_third_party_column(&mut frame)?;

        Ok(SourceTable {
            sheet_name: raw.sheet_name,
            frame,
            sheet_rows: raw.rows.iter().map(|(sheet_row, _)| *sheet_row).collect(),
        })
    }
}

fn create_dataframe(raw: &RawSheet) -> Result<DataFrame, AppError> {
    if raw.headers.is_empty() {
        return Err(AppError::InvalidInput("Empty headers".to_string()));
    }

    let mut columns = Vec::with_capacity(raw.headers.len());

    for (col_idx, header) in raw.headers.iter().enumerate() {
        let values = raw.rows.iter()
            .map(|(_, row)| row.get(col_idx));

        let series = if NUMERIC_COLUMNS.contains(&header.as_str()) {
            let nums: Vec<Option<f64>> = values.map(|cell| cell.and_then(cell_to_number)).collect();
            Series::new(header.as_str(), nums)
        } else {
            // Third parties are reported exactly as exported; other text is trimmed.
            let verbatim = header == THIRD_PARTY_NAME;
            let strings: Vec<String> = values
                .map(|cell| cell.map(cell_to_string).unwrap_or_default())
                .map(|text| if verbatim { text } else { text.trim().to_string() })
                .collect();
            Series::new(header.as_str(), strings)
        };

        columns.push(series);
    }

    DataFrame::new(columns)
        .map_err(|e| AppError::DataFrameError(format!("Failed to create DataFrame: {}", e)))
}

pub fn ensure_third_party_column(frame: &mut DataFrame) -> Result<(), AppError> {
    if frame.get_column_names().contains(&THIRD_PARTY_NAME) {
        return Ok(());
    }

    tracing::info!("Column '{}' not found, adding it blank", THIRD_PARTY_NAME);
    let blanks = vec![String::new(); frame.height()];
    frame.with_column(Series::new(THIRD_PARTY_NAME, blanks))?;
    Ok(())
}
