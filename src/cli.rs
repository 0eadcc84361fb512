use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use crate::models::{Metadata, ReportKind};
use crate::services::bundle::write_atomic;
use crate::services::excel::{preview_export, types::SheetPreview};
use crate::services::pipeline::generate_reports;

/// Writes every report that could be built into `output_dir`. A report that
/// fails to write does not stop the others; the run still ends in an error.
pub fn run_process(
    input: &Path,
    metadata: &Metadata,
    output_dir: &Path,
    header_row: usize,
) -> Result<Vec<PathBuf>> {
    let file_data = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    tracing::info!("Processing {} ({}KB)", input.display(), file_data.len() / 1024);

    let files = generate_reports(&file_data, metadata, header_row, &ReportKind::ALL)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut saved = Vec::new();
    let mut failures = Vec::new();
    for file in files {
        let file_name = file.file_name();
        tracing::info!("{}: {} rows", file_name, file.rows);
        let written = file.outcome
            .and_then(|bytes| write_atomic(output_dir, &file_name, &bytes));
        match written {
            Ok(path) => saved.push(path),
            Err(e) => {
                tracing::error!("{}", e);
                failures.push(e.to_string());
            }
        }
    }

    if !failures.is_empty() {
        bail!("{} report(s) failed: {}", failures.len(), failures.join("; "));
    }
    Ok(saved)
}

pub fn run_preview(input: &Path, header_row: usize, rows: usize) -> Result<SheetPreview> {
    let file_data = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    Ok(preview_export(&file_data, header_row, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::excel::fixtures::{read_workbook, sample_export, workbook_bytes, FixtureCell, SampleRow};

    fn metadata() -> Metadata {
        Metadata::new("Junio", "Definitivo", "2024", "CC-02").unwrap()
    }

    #[test]
    fn test_process_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.xlsx");
        std::fs::write(
            &input,
            sample_export(&[SampleRow::summary("110505", "Caja general", 10.0)], true),
        )
        .unwrap();
        let out = dir.path().join("salida");

        let saved = run_process(&input, &metadata(), &out, 7).unwrap();
        assert_eq!(saved, vec![
            out.join("datos_balance_general.xlsx"),
            out.join("datos_estado_resultados.xlsx"),
        ]);

        let (_, rows) = read_workbook(&std::fs::read(&saved[0]).unwrap());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_process_with_missing_column_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.xlsx");
        std::fs::write(
            &input,
            workbook_bytes(7, &["Transaccional"], &[vec![FixtureCell::Text("No")]]),
        )
        .unwrap();
        let out = dir.path().join("salida");

        let err = run_process(&input, &metadata(), &out, 7).unwrap_err();
        assert!(err.to_string().contains("Missing required columns"));
        assert!(!out.exists());
    }

    #[test]
    fn test_failed_write_leaves_other_file_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.xlsx");
        std::fs::write(
            &input,
            sample_export(&[SampleRow::summary("413595", "Otras ventas", -80.0)], true),
        )
        .unwrap();
        let out = dir.path().join("salida");
        std::fs::create_dir_all(out.join("datos_balance_general.xlsx")).unwrap();

        let err = run_process(&input, &metadata(), &out, 7).unwrap_err();
        assert!(err.to_string().contains("datos_balance_general.xlsx"));
        assert!(out.join("datos_balance_general.xlsx").is_dir());

        let (sheet_name, rows) = read_workbook(&std::fs::read(out.join("datos_estado_resultados.xlsx")).unwrap());
        assert_eq!(sheet_name, "datos_estado_resultados");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_process_reports_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.xlsx");
        std::fs::write(&input, b"corrupt").unwrap();

        let result = run_process(&input, &metadata(), dir.path(), 7);
        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_preview_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.xlsx");
        std::fs::write(
            &input,
            sample_export(&[SampleRow::summary("110505", "Caja general", 10.0)], true),
        )
        .unwrap();

        let preview = run_preview(&input, 7, 3).unwrap();
        assert_eq!(preview.row_count, 1);
        assert!(preview.has_third_party_column);
    }
}
