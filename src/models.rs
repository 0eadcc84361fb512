use serde::Serialize;
use crate::error::AppError;

/// Values typed in by the user for one run and stamped on every output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub mes: String,
    pub estado: String,
    pub anio: String,
    pub centro_costos: String,
}

impl Metadata {
    /// Values are kept exactly as given; only blank ones are rejected.
    pub fn new(
        mes: impl Into<String>,
        estado: impl Into<String>,
        anio: impl Into<String>,
        centro_costos: impl Into<String>,
    ) -> Result<Self, AppError> {
        let metadata = Self {
            mes: mes.into(),
            estado: estado.into(),
            anio: anio.into(),
            centro_costos: centro_costos.into(),
        };

        let missing: Vec<&str> = [
            ("MES", &metadata.mes),
            ("ESTADO", &metadata.estado),
            ("AÑO", &metadata.anio),
            ("CENTRO DE COSTOS", &metadata.centro_costos),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect();

        if missing.is_empty() {
            Ok(metadata)
        } else {
            Err(AppError::InvalidInput(format!(
                "Please fill in {}",
                missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportKind {
    BalanceGeneral,
    EstadoResultados,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::BalanceGeneral, ReportKind::EstadoResultados];

    pub fn sheet_name(&self) -> &'static str {
        match self {
            ReportKind::BalanceGeneral => "datos_balance_general",
            ReportKind::EstadoResultados => "datos_estado_resultados",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.xlsx", self.sheet_name())
    }

    /// Accepts either the sheet name or the full file name.
    pub fn from_stem(stem: &str) -> Option<Self> {
        let stem = stem.strip_suffix(".xlsx").unwrap_or(stem);
        Self::ALL.into_iter().find(|kind| kind.sheet_name() == stem)
    }

    /// Balance sheet holds classes 1-3; classes 4-9 go to the income statement.
    pub fn for_account_class(class_digit: char) -> Option<Self> {
        match class_digit {
            '1'..='3' => Some(ReportKind::BalanceGeneral),
            '4'..='9' => Some(ReportKind::EstadoResultados),
            _ => None,
        }
    }
}

/// One output row. Balance and income statement rows share this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub mes: String,
    pub estado: String,
    pub anio: String,
    pub centro_costos: String,
    pub clase: String,
    pub grupo: String,
    pub subgrupo: String,
    pub cuenta: String,
    pub tercero: String,
    pub valor: Option<f64>,
}

pub const REPORT_HEADERS: [&str; 10] = [
    "MES",
    "ESTADO",
    "AÑO",
    "CENTRO DE COSTOS",
    "CLASE",
    "GRUPO",
    "SUBGRUPO",
    "CUENTA",
    "TERCERO",
    "VALOR",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub kind: ReportKind,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind, rows: Vec::new() }
    }
}
