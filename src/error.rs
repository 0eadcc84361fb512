use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unreadable workbook: {0}")]
    UnreadableWorkbook(String),

    #[error("Missing required columns in the Excel file: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid account code '{value}' on sheet row {row}")]
    InvalidAccountCode { row: usize, value: String },

    #[error("Failed to write {file}: {message}")]
    WriteFailed { file: String, message: String },

    #[error("DataFrame error: {0}")]
    DataFrameError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<polars::error::PolarsError> for AppError {
    fn from(err: polars::error::PolarsError) -> Self {
        AppError::DataFrameError(err.to_string())
    }
}

impl From<calamine::XlsxError> for AppError {
    fn from(err: calamine::XlsxError) -> Self {
        AppError::UnreadableWorkbook(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::UnreadableWorkbook(_)
            | AppError::MissingColumns(_)
            | AppError::InvalidAccountCode { .. } => StatusCode::BAD_REQUEST,
            AppError::WriteFailed { .. }
            | AppError::DataFrameError(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_lists_every_name() {
        let err = AppError::MissingColumns(vec!["Saldo final".into(), "Sucursal".into()]);
        let msg = err.to_string();
        assert!(msg.contains("Saldo final, Sucursal"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_write_failure_is_server_error() {
        let err = AppError::WriteFailed {
            file: "datos_balance_general.xlsx".into(),
            message: "disk full".into(),
        };
        assert!(err.to_string().contains("datos_balance_general.xlsx"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
