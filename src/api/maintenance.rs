use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use super::domain_error_response;
use crate::domain::DomainError;
use crate::modules::maintenance::parse_day;
use crate::services::maintenance_service::{
    self, CompleteTaskInput, CreateEquipmentInput, CreateTaskInput, CreateTemplateInput,
};

#[derive(Debug, Default, Deserialize)]
pub struct AquariumQuery {
    pub aquarium_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub aquarium_id: i32,
    /// Reference day, defaults to today (UTC)
    pub today: Option<String>,
}

pub async fn list_equipment(
    State(db): State<DatabaseConnection>,
    Query(query): Query<AquariumQuery>,
) -> Response {
    match maintenance_service::list_equipment(&db, query.aquarium_id).await {
        Ok(items) => Json(json!({ "equipment": items })).into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn create_equipment(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateEquipmentInput>,
) -> Response {
    match maintenance_service::create_equipment(&db, payload).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn list_templates(State(db): State<DatabaseConnection>) -> Response {
    match maintenance_service::list_templates(&db).await {
        Ok(templates) => Json(json!({ "templates": templates })).into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn create_template(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateTemplateInput>,
) -> Response {
    match maintenance_service::create_template(&db, payload).await {
        Ok(template) => (StatusCode::CREATED, Json(template)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn list_tasks(
    State(db): State<DatabaseConnection>,
    Query(query): Query<AquariumQuery>,
) -> Response {
    match maintenance_service::list_tasks(&db, query.aquarium_id).await {
        Ok(tasks) => Json(json!({ "tasks": tasks })).into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn create_task(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateTaskInput>,
) -> Response {
    match maintenance_service::create_task(&db, payload).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn complete_task(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    payload: Option<Json<CompleteTaskInput>>,
) -> Response {
    let input = payload.map(|Json(p)| p).unwrap_or_default();
    match maintenance_service::complete_task(&db, id, input).await {
        Ok(task) => Json(task).into_response(),
        Err(e) => domain_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/maintenance/suggestions",
    params(
        ("aquarium_id" = i32, Query, description = "Aquarium to plan for"),
        ("today" = Option<String>, Query, description = "Reference day (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Suggestions ranked overdue, due soon, scheduled")
    )
)]
pub async fn suggestions(
    State(db): State<DatabaseConnection>,
    Query(query): Query<SuggestionQuery>,
) -> Response {
    let today: NaiveDate = match query.today.as_deref() {
        Some(raw) => match parse_day(raw) {
            Some(day) => day,
            None => {
                return domain_error_response(DomainError::Validation(
                    "today must be a date (YYYY-MM-DD)".to_string(),
                ));
            }
        },
        None => chrono::Utc::now().date_naive(),
    };

    match maintenance_service::suggestions_for_aquarium(&db, query.aquarium_id, today).await {
        Ok(suggestions) => Json(json!({
            "today": today,
            "suggestions": suggestions,
        }))
        .into_response(),
        Err(e) => domain_error_response(e),
    }
}
