use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only log of counsellor follow-ups on a lead
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lead_follow_ups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub lead_id: Uuid,
    pub follow_up_date: DateTime,
    pub notes: Option<String>,
    pub next_action: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lead::Entity",
        from = "Column::LeadId",
        to = "super::lead::Column::Id"
    )]
    Lead,
}

impl Related<super::lead::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lead.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
