use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub aquarium_id: i32,
    pub equipment_id: Option<i32>,
    pub template_id: Option<i32>,
    pub title: String,
    pub due_date: Option<String>, // YYYY-MM-DD
    #[sea_orm(default_value = "pending")]
    pub status: String,
    pub completed_at: Option<String>, // YYYY-MM-DD
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Model {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::EquipmentId",
        to = "super::equipment::Column::Id",
        on_delete = "SetNull"
    )]
    Equipment,
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
