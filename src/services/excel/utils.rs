use std::collections::HashSet;
use calamine::Data;
use once_cell::sync::Lazy;
use regex::Regex;
use super::types::REQUIRED_COLUMNS;

static ACCOUNT_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Text form of a cell, text kept as written. Integral floats lose their `.0`
/// so codes read as `110505`.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

pub fn cell_to_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Header text as a frame column name. Blank headers get a positional name and
/// repeats get a numeric suffix, so the first occurrence keeps the real name.
pub fn unique_column_name(header: &str, index: usize, existing_names: &mut HashSet<String>) -> String {
    let base_name = if header.is_empty() {
        format!("column_{}", index + 1)
    } else {
        header.to_string()
    };

    let mut cleaned = base_name.clone();
    let mut counter = 1;
    while !existing_names.insert(cleaned.clone()) {
        cleaned = format!("{}_{}", base_name, counter);
        counter += 1;
    }

    cleaned
}

pub fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| cell_to_string(cell).trim().is_empty())
}

pub fn is_account_code(value: &str) -> bool {
    ACCOUNT_CODE_RE.is_match(value)
}

/// Required columns absent from `headers`, sorted by name.
pub fn missing_columns(headers: &[String]) -> Vec<String> {
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    missing.sort();
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_drops_integral_fraction() {
        assert_eq!(cell_to_string(&Data::Float(110505.0)), "110505");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::String("  Caja ".into())), "  Caja ");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_cell_to_number() {
        assert_eq!(cell_to_number(&Data::Float(-3.25)), Some(-3.25));
        assert_eq!(cell_to_number(&Data::String(" 1500 ".into())), Some(1500.0));
        assert_eq!(cell_to_number(&Data::String("n/a".into())), None);
        assert_eq!(cell_to_number(&Data::Empty), None);
    }

    #[test]
    fn test_unique_column_name() {
        let mut seen = HashSet::new();
        assert_eq!(unique_column_name("Saldo final", 0, &mut seen), "Saldo final");
        assert_eq!(unique_column_name("Saldo final", 1, &mut seen), "Saldo final_1");
        assert_eq!(unique_column_name("", 2, &mut seen), "column_3");
    }

    #[test]
    fn test_is_account_code() {
        assert!(is_account_code("110505"));
        assert!(!is_account_code("1105-05"));
        assert!(!is_account_code("Total"));
        assert!(!is_account_code(""));
    }

    #[test]
    fn test_missing_columns_sorted() {
        let headers: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| **c != "Sucursal" && **c != "Saldo final")
            .map(|c| c.to_string())
            .collect();
        assert_eq!(missing_columns(&headers), vec!["Saldo final", "Sucursal"]);
    }
}
