use models::lead_status::LeadStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub course_interest: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub assigned_counsellor_id: Option<Uuid>,
    pub converted_date: Option<DateTime>,
    pub notes: Option<String>,
    pub next_follow_up_date: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::AssignedCounsellorId",
        to = "super::employee::Column::Id"
    )]
    AssignedCounsellor,
    #[sea_orm(has_many = "super::student::Entity")]
    ConvertedStudents,
    #[sea_orm(has_many = "super::lead_follow_up::Entity")]
    FollowUps,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedCounsellor.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConvertedStudents.def()
    }
}

impl Related<super::lead_follow_up::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FollowUps.def()
    }
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_converted(&self) -> bool {
        self.status == LeadStatus::Converted
    }
}

impl ActiveModelBehavior for ActiveModel {}
