//! In-memory SIIGO-style workbooks for tests.

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

pub enum FixtureCell {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// A workbook with a title on the first row, `headers` on `header_row` and
/// `rows` right below it.
pub fn workbook_bytes(header_row: u32, headers: &[&str], rows: &[Vec<FixtureCell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if header_row > 0 {
        worksheet.write_string(0, 0, "Balance de prueba por tercero").unwrap();
    }

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(header_row, col as u16, *header).unwrap();
    }

    for (offset, row) in rows.iter().enumerate() {
        let sheet_row = header_row + 1 + offset as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                FixtureCell::Text(text) if text.is_empty() => {}
                FixtureCell::Text(text) => {
                    worksheet.write_string(sheet_row, col as u16, *text).unwrap();
                }
                FixtureCell::Number(value) => {
                    worksheet.write_number(sheet_row, col as u16, *value).unwrap();
                }
                FixtureCell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

#[derive(Debug, Clone)]
pub struct SampleRow {
    pub transactional: &'static str,
    pub code: &'static str,
    pub name: &'static str,
    pub third_party: &'static str,
    pub final_balance: Option<f64>,
}

impl SampleRow {
    /// A non-transactional (summary) account line.
    pub fn summary(code: &'static str, name: &'static str, final_balance: f64) -> Self {
        Self {
            transactional: "No",
            code,
            name,
            third_party: "",
            final_balance: Some(final_balance),
        }
    }

    pub fn transactional(mut self) -> Self {
        self.transactional = "Si";
        self
    }

    pub fn with_third_party(mut self, third_party: &'static str) -> Self {
        self.third_party = third_party;
        self
    }

    pub fn without_balance(mut self) -> Self {
        self.final_balance = None;
        self
    }
}

/// A SIIGO export with the header on the eighth sheet row.
pub fn sample_export(rows: &[SampleRow], with_third_party: bool) -> Vec<u8> {
    let mut headers = vec![
        "Nivel",
        "Transaccional",
        "Código cuenta contable",
        "Nombre cuenta contable",
        "Identificación",
        "Sucursal",
    ];
    if with_third_party {
        headers.push("Nombre tercero");
    }
    headers.extend(["Saldo inicial", "Movimiento débito", "Movimiento crédito", "Saldo final"]);

    let cells: Vec<Vec<FixtureCell>> = rows
        .iter()
        .map(|row| {
            let code = match row.code.parse::<f64>() {
                Ok(value) => FixtureCell::Number(value),
                Err(_) => FixtureCell::Text(row.code),
            };
            let mut cells = vec![
                FixtureCell::Text("Subcuenta"),
                FixtureCell::Text(row.transactional),
                code,
                FixtureCell::Text(row.name),
                FixtureCell::Text(""),
                FixtureCell::Number(0.0),
            ];
            if with_third_party {
                cells.push(FixtureCell::Text(row.third_party));
            }
            cells.extend([
                FixtureCell::Number(0.0),
                FixtureCell::Number(0.0),
                FixtureCell::Number(0.0),
                row.final_balance.map_or(FixtureCell::Blank, FixtureCell::Number),
            ]);
            cells
        })
        .collect();

    workbook_bytes(7, &headers, &cells)
}

/// Sheet name and cells of the first worksheet.
pub fn read_workbook(bytes: &[u8]) -> (String, Vec<Vec<Data>>) {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let sheet_name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&sheet_name).unwrap();
    let rows = range.rows().map(|row| row.to_vec()).collect();
    (sheet_name, rows)
}
