use models::{placement_status::PlacementStatus, placement_terms};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "placements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub company_id: Uuid,
    pub position: String,
    pub salary: Option<Decimal>,
    pub placement_date: Date,
    pub status: PlacementStatus,
    pub probation_period_months: Option<i32>,
    pub joining_date: Option<Date>,
    pub end_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Model {
    pub fn is_active(&self, today: Date) -> bool {
        placement_terms::is_active(self.status, self.end_date, today)
    }

    pub fn is_in_probation(&self, today: Date) -> bool {
        placement_terms::is_in_probation(self.joining_date, self.probation_period_months, today)
    }

    pub fn tenure_in_months(&self, today: Date) -> u32 {
        placement_terms::tenure_in_months(self.joining_date, self.end_date, today)
    }
}

impl ActiveModelBehavior for ActiveModel {}
