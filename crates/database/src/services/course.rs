use crate::entities::{batch, course};
use crate::error::{ServiceError, ServiceResult};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct CourseService;

impl CourseService {
    pub async fn create_course(
        db: &DatabaseConnection,
        name: String,
        description: Option<String>,
        duration_months: i32,
        fees: Decimal,
    ) -> ServiceResult<course::Model> {
        if name.trim().is_empty() {
            return Err(ServiceError::Validation("course name is required".to_string()));
        }
        if duration_months < 1 {
            return Err(ServiceError::Validation(
                "course duration must be at least one month".to_string(),
            ));
        }
        if fees < Decimal::ZERO {
            return Err(ServiceError::Validation("fees cannot be negative".to_string()));
        }

        let duplicates = course::Entity::find()
            .filter(course::Column::Name.eq(&name))
            .count(db)
            .await?;
        if duplicates > 0 {
            return Err(ServiceError::Conflict(format!(
                "course with name {name} already exists"
            )));
        }

        let now = Utc::now().naive_utc();
        let new_course = course::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            duration_months: Set(duration_months),
            fees: Set(fees),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(new_course.insert(db).await?)
    }

    pub async fn get_course(db: &DatabaseConnection, id: Uuid) -> ServiceResult<course::Model> {
        course::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course", id))
    }

    pub async fn list_courses(
        db: &DatabaseConnection,
        search: Option<String>,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<(Vec<course::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(search) = search {
            condition = condition.add(course::Column::Name.like(format!("%{search}%")));
        }

        let query = course::Entity::find()
            .filter(condition)
            .order_by_asc(course::Column::Name);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let courses = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((courses, total_items))
    }

    pub async fn update_course(
        db: &DatabaseConnection,
        id: Uuid,
        description: Option<String>,
        fees: Option<Decimal>,
    ) -> ServiceResult<course::Model> {
        let existing = Self::get_course(db, id).await?;

        let mut active = existing.into_active_model();
        if let Some(description) = description {
            active.description = Set(Some(description));
        }
        if let Some(fees) = fees {
            if fees < Decimal::ZERO {
                return Err(ServiceError::Validation("fees cannot be negative".to_string()));
            }
            active.fees = Set(fees);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// A course with scheduled batches cannot be removed
    pub async fn delete_course(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let course = Self::get_course(db, id).await?;

        let batches = batch::Entity::find()
            .filter(batch::Column::CourseId.eq(id))
            .count(db)
            .await?;
        if batches > 0 {
            return Err(ServiceError::Conflict(format!(
                "cannot delete course {} with {batches} batches",
                course.name
            )));
        }

        course::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
