//! Maintenance Service - equipment, templates, tasks and suggestions
#![allow(clippy::needless_update)] // SeaORM ActiveModels require ..Default::default()

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::maintenance_task::{STATUS_COMPLETED, STATUS_PENDING};
use crate::models::{equipment, maintenance_task, maintenance_template};
use crate::modules::maintenance::{
    MAX_FREQUENCY_DAYS, MaintenanceSuggestion, parse_day, suggest_tasks,
};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipmentInput {
    pub aquarium_id: i32,
    pub name: String,
    pub equipment_type: String,
    pub brand: Option<String>,
    pub installed_at: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateInput {
    pub equipment_type: String,
    pub title: String,
    pub description: Option<String>,
    pub frequency_days: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskInput {
    pub aquarium_id: i32,
    pub equipment_id: Option<i32>,
    pub template_id: Option<i32>,
    pub title: String,
    pub due_date: Option<String>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteTaskInput {
    /// Defaults to today
    pub completed_at: Option<String>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

fn require(value: &str, what: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", what)));
    }
    Ok(value.to_string())
}

/// Normalize an optional date to `YYYY-MM-DD`.
fn normalize_day(value: Option<String>, what: &str) -> Result<Option<String>, DomainError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_day(raw)
            .map(|d| Some(d.format("%Y-%m-%d").to_string()))
            .ok_or_else(|| DomainError::Validation(format!("{} must be a date (YYYY-MM-DD)", what))),
    }
}

pub async fn list_equipment(
    db: &DatabaseConnection,
    aquarium_id: Option<i32>,
) -> Result<Vec<equipment::Model>, DomainError> {
    let mut query = equipment::Entity::find();
    if let Some(aquarium_id) = aquarium_id {
        query = query.filter(equipment::Column::AquariumId.eq(aquarium_id));
    }
    Ok(query.order_by_asc(equipment::Column::Id).all(db).await?)
}

pub async fn create_equipment(
    db: &DatabaseConnection,
    input: CreateEquipmentInput,
) -> Result<equipment::Model, DomainError> {
    let now = chrono::Utc::now().to_rfc3339();

    let item = equipment::ActiveModel {
        aquarium_id: Set(input.aquarium_id),
        name: Set(require(&input.name, "name")?),
        equipment_type: Set(require(&input.equipment_type, "equipment_type")?),
        brand: Set(input.brand),
        installed_at: Set(normalize_day(input.installed_at, "installed_at")?),
        notes: Set(input.notes),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(item.insert(db).await?)
}

pub async fn list_templates(
    db: &DatabaseConnection,
) -> Result<Vec<maintenance_template::Model>, DomainError> {
    Ok(maintenance_template::Entity::find()
        .order_by_asc(maintenance_template::Column::EquipmentType)
        .order_by_asc(maintenance_template::Column::FrequencyDays)
        .all(db)
        .await?)
}

pub async fn create_template(
    db: &DatabaseConnection,
    input: CreateTemplateInput,
) -> Result<maintenance_template::Model, DomainError> {
    if input.frequency_days <= 0 || input.frequency_days > MAX_FREQUENCY_DAYS {
        return Err(DomainError::Validation(format!(
            "frequency_days must be between 1 and {}",
            MAX_FREQUENCY_DAYS
        )));
    }

    let template = maintenance_template::ActiveModel {
        equipment_type: Set(require(&input.equipment_type, "equipment_type")?),
        title: Set(require(&input.title, "title")?),
        description: Set(input.description),
        frequency_days: Set(input.frequency_days),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    Ok(template.insert(db).await?)
}

pub async fn list_tasks(
    db: &DatabaseConnection,
    aquarium_id: Option<i32>,
) -> Result<Vec<maintenance_task::Model>, DomainError> {
    let mut query = maintenance_task::Entity::find();
    if let Some(aquarium_id) = aquarium_id {
        query = query.filter(maintenance_task::Column::AquariumId.eq(aquarium_id));
    }
    Ok(query
        .order_by_asc(maintenance_task::Column::DueDate)
        .order_by_asc(maintenance_task::Column::Id)
        .all(db)
        .await?)
}

pub async fn create_task(
    db: &DatabaseConnection,
    input: CreateTaskInput,
) -> Result<maintenance_task::Model, DomainError> {
    let now = chrono::Utc::now().to_rfc3339();

    let task = maintenance_task::ActiveModel {
        aquarium_id: Set(input.aquarium_id),
        equipment_id: Set(input.equipment_id),
        template_id: Set(input.template_id),
        title: Set(require(&input.title, "title")?),
        due_date: Set(normalize_day(input.due_date, "due_date")?),
        status: Set(STATUS_PENDING.to_string()),
        completed_at: Set(None),
        cost: Set(input.cost),
        notes: Set(input.notes),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(task.insert(db).await?)
}

pub async fn complete_task(
    db: &DatabaseConnection,
    id: i32,
    input: CompleteTaskInput,
) -> Result<maintenance_task::Model, DomainError> {
    let existing = maintenance_task::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let completed_at = normalize_day(input.completed_at, "completed_at")?
        .unwrap_or_else(|| chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string());

    let mut task: maintenance_task::ActiveModel = existing.into();
    task.status = Set(STATUS_COMPLETED.to_string());
    task.completed_at = Set(Some(completed_at));
    if input.cost.is_some() {
        task.cost = Set(input.cost);
    }
    if input.notes.is_some() {
        task.notes = Set(input.notes);
    }
    task.updated_at = Set(chrono::Utc::now().to_rfc3339());

    Ok(task.update(db).await?)
}

/// Ranked suggestions for one aquarium as of `today`
pub async fn suggestions_for_aquarium(
    db: &DatabaseConnection,
    aquarium_id: i32,
    today: NaiveDate,
) -> Result<Vec<MaintenanceSuggestion>, DomainError> {
    let equipment = list_equipment(db, Some(aquarium_id)).await?;
    let templates = list_templates(db).await?;
    let tasks = list_tasks(db, Some(aquarium_id)).await?;

    let suggestions = suggest_tasks(&equipment, &templates, &tasks, today);
    tracing::info!(
        "Aquarium {}: {} maintenance suggestion(s) from {} equipment item(s)",
        aquarium_id,
        suggestions.len(),
        equipment.len()
    );
    Ok(suggestions)
}
