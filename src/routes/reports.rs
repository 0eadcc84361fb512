use axum::{
    extract::{Multipart, Path, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::post,
    Router,
    Json,
};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::{Metadata, ReportKind},
    services::{
        bundle::{zip_reports, BUNDLE_NAME},
        excel::{preview_export, types::{SheetPreview, SAMPLE_SIZE}},
        pipeline::{generate_reports, ReportFile},
    },
};
use tower_http::cors::{CorsLayer, Any};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/reports/generate", post(generate_bundle))
        .route("/reports/files/:report", post(generate_single))
        .route("/reports/preview", post(preview))
        .layer(cors)
}

/// Multipart upload: the export under `file` plus the four metadata fields.
#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    file_data: Option<Bytes>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await
            .map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "file" {
                form.file_name = field.file_name().map(|s| s.to_string());
                form.file_data = Some(field.bytes().await
                    .map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?);
            } else {
                let value = field.text().await
                    .map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    fn file(&self) -> Result<Bytes, AppError> {
        if let Some(name) = &self.file_name {
            if !name.to_lowercase().ends_with(".xlsx") {
                tracing::error!("Unsupported file type: {}", name);
                return Err(AppError::InvalidInput("Only XLSX files are supported".to_string()));
            }
        }

        match &self.file_data {
            Some(data) if !data.is_empty() => Ok(data.clone()),
            _ => Err(AppError::InvalidInput("No file provided".to_string())),
        }
    }

    fn field(&self, names: &[&str]) -> String {
        names.iter()
            .find_map(|name| self.fields.get(*name))
            .cloned()
            .unwrap_or_default()
    }

    fn metadata(&self) -> Result<Metadata, AppError> {
        Metadata::new(
            self.field(&["mes"]),
            self.field(&["estado"]),
            self.field(&["anio", "año"]),
            self.field(&["centro_costos"]),
        )
    }
}

async fn run_pipeline(
    state: &AppState,
    form: UploadForm,
    kinds: Vec<ReportKind>,
) -> Result<Vec<ReportFile>, AppError> {
    let file_data = form.file()?;
    let metadata = form.metadata()?;
    let header_row = state.config.header_row;

    tracing::info!(
        "Generating {:?} from {} ({}KB) for MES={} AÑO={} CENTRO DE COSTOS={}",
        kinds,
        form.file_name.as_deref().unwrap_or("upload"),
        file_data.len() / 1024,
        metadata.mes,
        metadata.anio,
        metadata.centro_costos
    );

    tokio::task::spawn_blocking(move || generate_reports(&file_data, &metadata, header_row, &kinds))
        .await
        .map_err(|e| AppError::Internal(format!("Report task failed: {}", e)))?
}

fn attachment(content_type: &str, file_name: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
        ],
        body,
    )
        .into_response()
}

async fn generate_bundle(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = UploadForm::read(multipart).await?;
    let files = run_pipeline(&state, form, ReportKind::ALL.to_vec()).await?;

    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let file_name = file.file_name();
        entries.push((file_name, file.outcome?));
    }

    let bundle = zip_reports(&entries)?;
    tracing::info!("Sending {} ({}KB)", BUNDLE_NAME, bundle.len() / 1024);
    Ok(attachment("application/zip", BUNDLE_NAME, bundle))
}

async fn generate_single(
    State(state): State<Arc<AppState>>,
    Path(report): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let kind = ReportKind::from_stem(&report)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown report: {}", report)))?;

    let form = UploadForm::read(multipart).await?;
    let file = run_pipeline(&state, form, vec![kind]).await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Internal(format!("{} was not generated", kind.file_name())))?;

    let file_name = file.file_name();
    Ok(attachment(XLSX_CONTENT_TYPE, &file_name, file.outcome?))
}

async fn preview(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SheetPreview>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let file_data = form.file()?;
    let header_row = state.config.header_row;

    let preview = tokio::task::spawn_blocking(move || preview_export(&file_data, header_row, SAMPLE_SIZE))
        .await
        .map_err(|e| AppError::Internal(format!("Preview task failed: {}", e)))??;

    Ok(Json(preview))
}
