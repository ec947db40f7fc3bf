use models::batch_status::BatchStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub course_id: Uuid,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub capacity: i32,
    pub current_enrollment: i32,
    pub status: BatchStatus,
    pub instructor_id: Option<Uuid>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::InstructorId",
        to = "super::employee::Column::Id"
    )]
    Instructor,
    #[sea_orm(has_many = "super::student::Entity")]
    Students,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Model {
    pub fn available_slots(&self) -> i32 {
        self.capacity - self.current_enrollment
    }

    pub fn has_available_slots(&self) -> bool {
        self.current_enrollment < self.capacity
    }

    pub fn utilization_percentage(&self) -> f64 {
        f64::from(self.current_enrollment) / f64::from(self.capacity) * 100.0
    }

    /// A batch takes students only while it has room and is PLANNED or ACTIVE
    pub fn can_enroll(&self) -> bool {
        self.has_available_slots() && self.status.accepts_enrollment()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::Model;
    use chrono::{NaiveDate, NaiveDateTime};
    use models::batch_status::BatchStatus;
    use uuid::Uuid;

    fn batch(capacity: i32, current_enrollment: i32, status: BatchStatus) -> Model {
        let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        Model {
            id: Uuid::new_v4(),
            name: "RUST-2026-A".to_string(),
            course_id: Uuid::new_v4(),
            start_date: start,
            end_date: None,
            capacity,
            current_enrollment,
            status,
            instructor_id: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_available_slots() {
        assert_eq!(batch(30, 12, BatchStatus::Active).available_slots(), 18);
        assert_eq!(batch(30, 30, BatchStatus::Active).available_slots(), 0);
    }

    #[test]
    fn test_utilization_percentage() {
        let b = batch(20, 5, BatchStatus::Active);
        assert!((b.utilization_percentage() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_can_enroll_requires_room_and_open_status() {
        assert!(batch(10, 9, BatchStatus::Planned).can_enroll());
        assert!(batch(10, 9, BatchStatus::Active).can_enroll());
        assert!(!batch(10, 10, BatchStatus::Active).can_enroll());
        assert!(!batch(10, 0, BatchStatus::Completed).can_enroll());
        assert!(!batch(10, 0, BatchStatus::Cancelled).can_enroll());
    }
}
