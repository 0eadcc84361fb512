use std::collections::{BTreeMap, BTreeSet};
use polars::prelude::*;
use crate::error::AppError;
use crate::models::{Metadata, ReportKind, ReportRow, ReportTable};
use crate::services::chart_of_accounts::Classification;
use crate::services::excel::types::*;
use crate::services::excel::utils::is_account_code;

/// Codes shorter than this are headings (class, group, account), not subaccounts.
pub const MIN_CODE_LEN: usize = 6;

const SHEET_ROW: &str = "__sheet_row";

/// Grouping key: the cost center is the same for the whole run, so the
/// account code alone identifies an output line.
type AccountKey = String;

#[derive(Debug, Default)]
struct AccountGroup {
    names: BTreeSet<String>,
    third_parties: BTreeSet<String>,
    balances: Vec<f64>,
}

impl AccountGroup {
    fn name(&self) -> &str {
        self.names.iter().next().map(String::as_str).unwrap_or("")
    }

    /// Smallest non-blank third party, as written in the export.
    fn third_party(&self) -> &str {
        self.third_parties.iter().next().map(String::as_str).unwrap_or("")
    }

    /// Summed in sorted order so any row order gives the same bits.
    fn total(&self) -> Option<f64> {
        if self.balances.is_empty() {
            return None;
        }
        let mut balances = self.balances.clone();
        balances.sort_by(|a, b| a.total_cmp(b));
        Some(balances.iter().sum())
    }
}

/// Derives the balance sheet and income statement from a loaded export.
pub fn transform(
    table: &SourceTable,
    metadata: &Metadata,
) -> Result<(ReportTable, ReportTable), AppError> {
    let groups = group_summary_accounts(table)?;

    let mut balance = ReportTable::new(ReportKind::BalanceGeneral);
    let mut results = ReportTable::new(ReportKind::EstadoResultados);
    let mut skipped = 0usize;

    for (code, group) in &groups {
        let classification = Classification::of(code);
        if code.len() < MIN_CODE_LEN || !classification.is_reportable() {
            skipped += 1;
            continue;
        }

        let kind = match code.chars().next().and_then(ReportKind::for_account_class) {
            Some(kind) => kind,
            None => {
                skipped += 1;
                continue;
            }
        };

        let row = ReportRow {
            mes: metadata.mes.clone(),
            estado: metadata.estado.clone(),
            anio: metadata.anio.clone(),
            centro_costos: metadata.centro_costos.clone(),
            clase: classification.clase.to_string(),
            grupo: classification.grupo.to_string(),
            subgrupo: classification.subgrupo.to_string(),
            cuenta: format!("{} - {}", code, group.name()),
            tercero: group.third_party().to_string(),
            valor: group.total(),
        };

        match kind {
            ReportKind::BalanceGeneral => balance.rows.push(row),
            ReportKind::EstadoResultados => results.rows.push(row),
        }
    }

    tracing::info!(
        "Built {} balance rows and {} income statement rows from {} account groups ({} left out)",
        balance.rows.len(),
        results.rows.len(),
        groups.len(),
        skipped
    );

    Ok((balance, results))
}

/// Summary (non-transactional) lines grouped by account code.
fn group_summary_accounts(table: &SourceTable) -> Result<BTreeMap<AccountKey, AccountGroup>, AppError> {
    let mut frame = table.frame.clone();
    let sheet_rows: Vec<u64> = table.sheet_rows.iter().map(|row| *row as u64 + 1).collect();
    frame.with_column(Series::new(SHEET_ROW, sheet_rows))?;

    let summary = frame.lazy()
        .filter(col(TRANSACTIONAL).eq(lit("No")))
        .select([
            col(SHEET_ROW),
            col(ACCOUNT_CODE),
            col(ACCOUNT_NAME),
            col(THIRD_PARTY_NAME),
            col(FINAL_BALANCE),
        ])
        .collect()?;
    tracing::debug!("{} of {} rows are summary accounts", summary.height(), table.frame.height());

    let sheet_rows = summary.column(SHEET_ROW)?.u64()?;
    let codes = summary.column(ACCOUNT_CODE)?.str()?;
    let names = summary.column(ACCOUNT_NAME)?.str()?;
    let third_parties = summary.column(THIRD_PARTY_NAME)?.str()?;
    let balances = summary.column(FINAL_BALANCE)?.f64()?;

    let mut groups: BTreeMap<AccountKey, AccountGroup> = BTreeMap::new();
    let mut invalid: Option<(u64, String)> = None;

    let lines = sheet_rows.into_iter()
        .zip(codes.into_iter())
        .zip(names.into_iter())
        .zip(third_parties.into_iter())
        .zip(balances.into_iter());

    for ((((sheet_row, code), name), third_party), balance) in lines {
        let code = code.unwrap_or("").trim();
        if code.is_empty() {
            continue;
        }
        if !is_account_code(code) {
            // Keep the first offending row by position so the error is stable.
            let sheet_row = sheet_row.unwrap_or_default();
            if invalid.as_ref().map_or(true, |(row, _)| sheet_row < *row) {
                invalid = Some((sheet_row, code.to_string()));
            }
            continue;
        }

        let group = groups.entry(code.to_string()).or_default();
        if let Some(third_party) = third_party.filter(|value| !value.trim().is_empty()) {
            group.third_parties.insert(third_party.to_string());
        }
        if let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) {
            group.names.insert(name.to_string());
        }
        if let Some(balance) = balance {
            group.balances.push(balance);
        }
    }

    if let Some((row, value)) = invalid {
        return Err(AppError::InvalidAccountCode { row: row as usize, value });
    }

    Ok(groups)
}
