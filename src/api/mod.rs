pub mod health;
pub mod import;
pub mod maintenance;
pub mod products;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Products
        .route("/products", get(products::list_products))
        .route("/products/visibility", post(products::bulk_visibility))
        .route(
            "/products/:id",
            get(products::get_product).delete(products::delete_product),
        )
        .route(
            "/products/:id/affiliate-link",
            get(products::get_affiliate_link),
        )
        // Import
        .route("/import/mapping", post(import::suggest_mapping))
        .route("/import/preview", post(import::preview_import))
        .route("/import", post(import::commit_import))
        // Equipment & maintenance
        .route(
            "/equipment",
            get(maintenance::list_equipment).post(maintenance::create_equipment),
        )
        .route(
            "/maintenance/templates",
            get(maintenance::list_templates).post(maintenance::create_template),
        )
        .route(
            "/maintenance/tasks",
            get(maintenance::list_tasks).post(maintenance::create_task),
        )
        .route(
            "/maintenance/tasks/:id/complete",
            put(maintenance::complete_task),
        )
        .route("/maintenance/suggestions", get(maintenance::suggestions))
        .with_state(state)
}

pub(crate) fn error_response(status: StatusCode, message: impl ToString) -> Response {
    (status, Json(json!({ "error": message.to_string() }))).into_response()
}

pub(crate) fn domain_error_response(e: DomainError) -> Response {
    let status = match e {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Database(_) => {
            tracing::error!("Request failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, e)
}
