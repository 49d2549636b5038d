use crate::models::maintenance_template;
use sea_orm::*;

/// Default schedule per equipment type: (type, title, description, days)
const DEFAULT_TEMPLATES: &[(&str, &str, &str, i32)] = &[
    ("filter", "Rinse filter media", "Rinse sponges in old tank water", 30),
    ("filter", "Replace filter cartridge", "Swap chemical media and floss", 90),
    ("filter", "Clean impeller", "Remove and clean the impeller housing", 180),
    ("heater", "Check heater calibration", "Compare set point against a thermometer", 90),
    ("light", "Clean light cover", "Wipe salt creep and algae off the cover", 30),
    ("light", "Replace bulbs", "Replace fluorescent or T5 tubes", 365),
    ("pump", "Clean return pump", "Soak in vinegar solution and rinse", 120),
    ("skimmer", "Empty collection cup", "Empty and rinse the skimmer cup", 7),
    ("co2", "Refill CO2 cylinder", "Check pressure and refill the cylinder", 60),
];

/// Insert the default maintenance templates when none exist yet
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let existing = maintenance_template::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(0);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let templates = DEFAULT_TEMPLATES
        .iter()
        .map(|(kind, title, description, days)| maintenance_template::ActiveModel {
            equipment_type: Set(kind.to_string()),
            title: Set(title.to_string()),
            description: Set(Some(description.to_string())),
            frequency_days: Set(*days),
            created_at: Set(now.clone()),
            ..Default::default()
        });

    maintenance_template::Entity::insert_many(templates).exec(db).await?;
    Ok(DEFAULT_TEMPLATES.len())
}
