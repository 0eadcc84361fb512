use calamine::Data;
use polars::prelude::DataFrame;
use serde::Serialize;

pub const SAMPLE_SIZE: usize = 5;

pub const TRANSACTIONAL: &str = "Transaccional";
pub const OPENING_BALANCE: &str = "Saldo inicial";
pub const DEBIT_MOVEMENT: &str = "Movimiento débito";
pub const CREDIT_MOVEMENT: &str = "Movimiento crédito";
pub const BRANCH: &str = "Sucursal";
pub const IDENTIFICATION: &str = "Identificación";
pub const ACCOUNT_CODE: &str = "Código cuenta contable";
pub const ACCOUNT_NAME: &str = "Nombre cuenta contable";
pub const FINAL_BALANCE: &str = "Saldo final";
pub const THIRD_PARTY_NAME: &str = "Nombre tercero";

pub const REQUIRED_COLUMNS: [&str; 9] = [
    TRANSACTIONAL,
    OPENING_BALANCE,
    DEBIT_MOVEMENT,
    CREDIT_MOVEMENT,
    BRANCH,
    IDENTIFICATION,
    ACCOUNT_CODE,
    ACCOUNT_NAME,
    FINAL_BALANCE,
];

pub const NUMERIC_COLUMNS: [&str; 4] = [
    OPENING_BALANCE,
    DEBIT_MOVEMENT,
    CREDIT_MOVEMENT,
    FINAL_BALANCE,
];

/// Cells of the first worksheet, split at the header row.
#[derive(Debug)]
pub struct RawSheet {
    pub sheet_name: String,
    pub sheet_names: Vec<String>,
    pub headers: Vec<String>,
    /// Data rows with their zero-based sheet row index.
    pub rows: Vec<(usize, Vec<Data>)>,
}

/// A loaded export with every required column present.
#[derive(Debug)]
pub struct SourceTable {
    pub sheet_name: String,
    pub frame: DataFrame,
    /// Zero-based sheet row of each frame row, for error messages.
    pub sheet_rows: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct SheetPreview {
    pub sheet_names: Vec<String>,
    pub sheet_name: String,
    pub header_row: usize,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub sample_data: Vec<Vec<String>>,
    pub missing_columns: Vec<String>,
    pub has_third_party_column: bool,
}
