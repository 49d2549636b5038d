use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub equipment_type: String,
    pub title: String,
    pub description: Option<String>,
    pub frequency_days: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
