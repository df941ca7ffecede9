//! Request handlers.

use std::io;
use std::path::{Path, PathBuf};

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use futures_util::{future, stream, StreamExt};
use tracing::{debug, info};

use crate::data::sample_questions;
use crate::export::{generate_request_id, Artifact, ExportError, Platform, QuizExporter};
use crate::models::{ExportRequest, QuestionItem};
use crate::protocol::{
    attachment_disposition, sanitize_upload_name, HealthResponse, DEFAULT_PLATFORM, FILE_FIELD,
    PLATFORM_FIELD, PLATFORM_HEADER, PLATFORM_URL_HEADER,
};

use super::cleanup::CleanupGuard;
use super::error::ApiError;
use super::server::AppState;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `POST /export`: JSON question list or multipart document upload.
pub async fn export(State(state): State<AppState>, request: Request) -> Result<Response, ApiError> {
    let request_id = generate_request_id();

    let (platform_id, questions) = if is_multipart(&request) {
        let multipart = Multipart::from_request(request, &state).await?;
        read_upload(&state, &request_id, multipart).await?
    } else {
        let Json(body) = Json::<ExportRequest>::from_request(request, &state).await?;
        body.validate()?;
        (body.platform, body.questions)
    };

    let platform = Platform::from_identifier(&platform_id);
    info!(
        request_id = %request_id,
        requested = %platform_id,
        platform = platform.display_name(),
        questions = questions.len(),
        "Export requested"
    );

    let exporter = QuizExporter::new(questions, request_id, state.config.export.clone());
    let artifact = tokio::task::spawn_blocking(move || exporter.export(platform))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    file_response(artifact).await
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

/// Reads the `file` and `platform` fields and turns the upload into questions.
///
/// Every stored upload is owned by a [`CleanupGuard`] from before it is
/// written, so all of them are gone once this returns, whichever way it
/// returns. When several `file` parts arrive the last one wins.
async fn read_upload(
    state: &AppState,
    request_id: &str,
    mut multipart: Multipart,
) -> Result<(String, Vec<QuestionItem>), ApiError> {
    let mut platform = DEFAULT_PLATFORM.to_string();
    let mut file_name: Option<String> = None;
    let mut stored: Vec<CleanupGuard> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let original = field.file_name().unwrap_or_default().to_string();
                let sanitized = sanitize_upload_name(&original).ok_or_else(|| {
                    ApiError::BadRequest("uploaded file has no usable name".to_string())
                })?;
                let data = field.bytes().await?;

                let path = upload_path(&state.config.upload_dir, request_id, &sanitized);
                if !stored.iter().any(|guard| guard.path() == path) {
                    stored.push(CleanupGuard::new(&path));
                }
                store_upload(&state.config.upload_dir, &path, &data)
                    .await
                    .map_err(|e| ApiError::Internal(format!("could not store upload: {}", e)))?;
                info!(request_id, file = %sanitized, bytes = data.len(), "Upload received");
                file_name = Some(sanitized);
            }
            Some(PLATFORM_FIELD) => {
                platform = field.text().await?;
            }
            _ => debug!(field = ?name, "Ignoring multipart field"),
        }
    }

    let file_name =
        file_name.ok_or_else(|| ApiError::BadRequest(format!("missing `{}` field", FILE_FIELD)))?;

    Ok((platform, sample_questions(&file_name)))
}

fn upload_path(upload_dir: &Path, request_id: &str, file_name: &str) -> PathBuf {
    upload_dir.join(format!("{}_{}", request_id, file_name))
}

async fn store_upload(upload_dir: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    tokio::fs::create_dir_all(upload_dir).await?;
    tokio::fs::write(path, data).await
}

/// Streams the artifact back; the file is removed once the body is done.
async fn file_response(artifact: Artifact) -> Result<Response, ApiError> {
    let cleanup = CleanupGuard::new(&artifact.path);
    let contents = tokio::fs::read(&artifact.path)
        .await
        .map_err(|e| ExportError::io(&artifact.path, e))?;

    let chunks = stream::once(future::ready(Ok::<_, io::Error>(Bytes::from(contents))));
    let body = Body::from_stream(chunks.map(move |chunk| {
        let _held = &cleanup;
        chunk
    }));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            attachment_disposition(&artifact.file_name),
        )
        .header(PLATFORM_URL_HEADER, artifact.platform.import_url())
        .header(PLATFORM_HEADER, artifact.platform.display_name())
        .body(body)
        .map_err(|e| ApiError::Internal(e.to_string()))
}
