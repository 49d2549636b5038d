use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::infrastructure::AppState;
use crate::modules::import::{
    FieldMapping, ImportError, ImportFormat, auto_map_headers, prepare_import,
};

#[derive(Debug, Deserialize)]
pub struct MappingRequest {
    pub headers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub format: ImportFormat,
    pub content: String,
    #[serde(default)]
    pub mapping: Option<FieldMapping>,
    #[serde(default = "default_sanitize_urls")]
    pub sanitize_urls: bool,
}

fn default_sanitize_urls() -> bool {
    true
}

fn import_error_response(e: ImportError) -> Response {
    match e {
        ImportError::Parse(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        ImportError::Rejected(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": format!("Import blocked by {} validation error(s)", errors.len()),
                "errors": errors,
            })),
        )
            .into_response(),
        ImportError::Insert { inserted, source } => {
            tracing::error!("Import aborted after {} product(s): {}", inserted, source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": source.to_string(),
                    "inserted": inserted,
                })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/import/mapping",
    responses(
        (status = 200, description = "Suggested column to field mapping")
    )
)]
pub async fn suggest_mapping(Json(payload): Json<MappingRequest>) -> Response {
    Json(json!({ "mapping": auto_map_headers(&payload.headers) })).into_response()
}

#[utoipa::path(
    post,
    path = "/api/import/preview",
    responses(
        (status = 200, description = "Parsed rows and validation errors"),
        (status = 400, description = "Input is not valid CSV/JSON")
    )
)]
pub async fn preview_import(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> Response {
    let options = state.import_options(payload.sanitize_urls);
    match prepare_import(
        payload.format,
        &payload.content,
        payload.mapping.as_ref(),
        &options,
    ) {
        Ok(batch) => Json(batch).into_response(),
        Err(e) => import_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/import",
    responses(
        (status = 201, description = "Products created"),
        (status = 400, description = "Input is not valid CSV/JSON"),
        (status = 422, description = "Batch rejected, all validation errors listed")
    )
)]
pub async fn commit_import(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> Response {
    let options = state.import_options(payload.sanitize_urls);

    let products = match prepare_import(
        payload.format,
        &payload.content,
        payload.mapping.as_ref(),
        &options,
    )
    .and_then(|batch| batch.into_ready())
    {
        Ok(products) => products,
        Err(e) => return import_error_response(e),
    };

    match state.import_service().import(products).await {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(e) => import_error_response(e),
    }
}
