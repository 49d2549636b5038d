use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::domain_error_response;
use crate::domain::{DomainError, ProductFilter, VisibilityUpdate};
use crate::infrastructure::AppState;
use crate::services::apply_visibility;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct BulkVisibilityRequest {
    pub ids: Vec<i32>,
    #[serde(flatten)]
    pub update: VisibilityUpdate,
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products matching the filters")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Response {
    let filter = ProductFilter {
        category: query.category,
        query: query.q,
        is_active: query.active,
    };

    match state.product_repo.find_all(filter).await {
        Ok(products) => Json(json!({
            "total": products.len(),
            "products": products,
        }))
        .into_response(),
        Err(e) => domain_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.product_repo.find_by_id(id).await {
        Ok(Some(product)) => Json(product).into_response(),
        Ok(None) => domain_error_response(DomainError::NotFound),
        Err(e) => domain_error_response(e),
    }
}

pub async fn delete_product(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.product_repo.delete(id).await {
        Ok(()) => Json(json!({ "message": "Product deleted successfully" })).into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn get_affiliate_link(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.affiliate_link_repo.find_by_product_id(id).await {
        Ok(Some(link)) => Json(link).into_response(),
        Ok(None) => domain_error_response(DomainError::NotFound),
        Err(e) => domain_error_response(e),
    }
}

pub async fn bulk_visibility(
    State(state): State<AppState>,
    Json(payload): Json<BulkVisibilityRequest>,
) -> Response {
    match apply_visibility(state.product_repo.as_ref(), &payload.ids, payload.update).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::error!("{}", e);
            let status = match &e.source {
                DomainError::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(json!({
                    "error": e.to_string(),
                    "updated": e.updated,
                    "failed_id": e.failed_id,
                })),
            )
                .into_response()
        }
    }
}
