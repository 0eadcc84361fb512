use crate::error::AppError;
use crate::models::{Metadata, ReportKind, ReportTable};
use crate::services::excel::{write_report, SiigoLoader};
use crate::services::transformer::transform;

/// Outcome of one output workbook. A failed write leaves the other file alone.
#[derive(Debug)]
pub struct ReportFile {
    pub kind: ReportKind,
    pub rows: usize,
    pub outcome: Result<Vec<u8>, AppError>,
}

impl ReportFile {
    pub fn file_name(&self) -> String {
        self.kind.file_name()
    }
}

/// Load, transform and build the requested reports from one export.
///
/// Loading and transforming are shared by every report, so their errors
/// abort the whole run. Writing happens per report.
pub fn generate_reports(
    file_data: &[u8],
    metadata: &Metadata,
    header_row: usize,
    kinds: &[ReportKind],
) -> Result<Vec<ReportFile>, AppError> {
    let start = std::time::Instant::now();

    let table = SiigoLoader::new(header_row).load(file_data)?;
    tracing::info!("Loaded {} rows from sheet {}", table.frame.height(), table.sheet_name);

    let (balance, results) = transform(&table, metadata)?;

    let files = [balance, results]
        .into_iter()
        .filter(|report| kinds.contains(&report.kind))
        .map(|report| build_file(&report))
        .collect();

    tracing::info!("Report generation completed in {:?}", start.elapsed());
    Ok(files)
}

fn build_file(report: &ReportTable) -> ReportFile {
    ReportFile {
        kind: report.kind,
        rows: report.rows.len(),
        outcome: write_report(report),
    }
}
