//! Maintenance suggestion ranking
//!
//! Pairs each piece of equipment with the templates of its type and ranks
//! the resulting tasks by how long the equipment has gone without service.

use chrono::{DateTime, Duration, NaiveDate};
use serde::Serialize;

use crate::models::{equipment, maintenance_task, maintenance_template};

/// Share of the template frequency after which a task is "due soon".
const DUE_SOON_RATIO: f64 = 0.8;

/// Longest accepted template frequency (100 years).
pub const MAX_FREQUENCY_DAYS: i32 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    DueSoon,
    Scheduled,
}

impl Urgency {
    pub fn classify(days_since: i64, frequency_days: i32) -> Self {
        let frequency = i64::from(frequency_days);
        if days_since > frequency {
            Urgency::Overdue
        } else if days_since as f64 >= frequency as f64 * DUE_SOON_RATIO {
            Urgency::DueSoon
        } else {
            Urgency::Scheduled
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceSuggestion {
    pub equipment_id: i32,
    pub equipment_name: String,
    pub template_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub frequency_days: i32,
    pub days_since_last: i64,
    pub last_maintained_on: NaiveDate,
    pub suggested_due_date: NaiveDate,
    pub urgency: Urgency,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn has_open_task(
    tasks: &[maintenance_task::Model],
    equipment: &equipment::Model,
    template: &maintenance_template::Model,
) -> bool {
    tasks.iter().any(|task| {
        !task.is_completed()
            && task.equipment_id == Some(equipment.id)
            && (task.template_id == Some(template.id)
                || task.title.eq_ignore_ascii_case(&template.title))
    })
}

/// Most recent completion for the equipment, else its install date, else
/// the day it was recorded.
fn last_maintained(
    tasks: &[maintenance_task::Model],
    equipment: &equipment::Model,
) -> Option<NaiveDate> {
    tasks
        .iter()
        .filter(|t| t.is_completed() && t.equipment_id == Some(equipment.id))
        .filter_map(|t| t.completed_at.as_deref().and_then(parse_day))
        .max()
        .or_else(|| equipment.installed_at.as_deref().and_then(parse_day))
        .or_else(|| parse_day(&equipment.created_at))
}

/// Rank upcoming maintenance: overdue first, then due soon, then scheduled.
/// Ties keep equipment/template input order.
pub fn suggest_tasks(
    equipment: &[equipment::Model],
    templates: &[maintenance_template::Model],
    tasks: &[maintenance_task::Model],
    today: NaiveDate,
) -> Vec<MaintenanceSuggestion> {
    let mut suggestions = Vec::new();

    for item in equipment {
        let Some(last) = last_maintained(tasks, item) else {
            tracing::debug!("Equipment {} has no usable dates, skipping", item.id);
            continue;
        };

        for template in templates {
            if template.frequency_days <= 0
                || !template
                    .equipment_type
                    .eq_ignore_ascii_case(&item.equipment_type)
                || has_open_task(tasks, item, template)
            {
                continue;
            }

            let Some(suggested_due_date) =
                last.checked_add_signed(Duration::days(i64::from(template.frequency_days)))
            else {
                tracing::debug!(
                    "Template {} frequency {} overflows the calendar, skipping",
                    template.id,
                    template.frequency_days
                );
                continue;
            };

            let days_since_last = (today - last).num_days();
            suggestions.push(MaintenanceSuggestion {
                equipment_id: item.id,
                equipment_name: item.name.clone(),
                template_id: template.id,
                title: template.title.clone(),
                description: template.description.clone(),
                frequency_days: template.frequency_days,
                days_since_last,
                last_maintained_on: last,
                suggested_due_date,
                urgency: Urgency::classify(days_since_last, template.frequency_days),
            });
        }
    }

    suggestions.sort_by_key(|s| s.urgency);
    suggestions
}
