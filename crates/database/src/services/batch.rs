use crate::entities::{batch, course, employee};
use crate::error::{ServiceError, ServiceResult};
use chrono::{Months, NaiveDate, Utc};
use models::batch_status::BatchStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    prelude::Expr, sea_query::ExprTrait,
};
use uuid::Uuid;

/// Optional filters for batch listings
#[derive(Debug, Default)]
pub struct BatchFilters {
    pub status: Option<BatchStatus>,
    pub course_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub has_available_slots: Option<bool>,
    pub search: Option<String>,
}

pub struct BatchService;

impl BatchService {
    pub async fn create_batch(
        db: &DatabaseConnection,
        name: String,
        course_id: Uuid,
        start_date: NaiveDate,
        capacity: i32,
        instructor_id: Option<Uuid>,
    ) -> ServiceResult<batch::Model> {
        if name.trim().is_empty() {
            return Err(ServiceError::Validation("batch name is required".to_string()));
        }
        if capacity < 1 {
            return Err(ServiceError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }

        let course = course::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course", course_id))?;

        if let Some(instructor_id) = instructor_id {
            employee::Entity::find_by_id(instructor_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Employee", instructor_id))?;
        }

        let duplicates = batch::Entity::find()
            .filter(batch::Column::Name.eq(&name))
            .count(db)
            .await?;
        if duplicates > 0 {
            return Err(ServiceError::Conflict(format!(
                "batch with name {name} already exists"
            )));
        }

        let end_date = Self::end_date_for(start_date, course.duration_months);
        let now = Utc::now().naive_utc();

        let new_batch = batch::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            course_id: Set(course.id),
            start_date: Set(start_date),
            end_date: Set(end_date),
            capacity: Set(capacity),
            current_enrollment: Set(0),
            status: Set(BatchStatus::Planned),
            instructor_id: Set(instructor_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(new_batch.insert(db).await?)
    }

    /// The batch runs for the referenced course's duration
    fn end_date_for(start_date: NaiveDate, duration_months: i32) -> Option<NaiveDate> {
        u32::try_from(duration_months)
            .ok()
            .and_then(|months| start_date.checked_add_months(Months::new(months)))
    }

    pub async fn get_batch(db: &DatabaseConnection, id: Uuid) -> ServiceResult<batch::Model> {
        batch::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Batch", id))
    }

    /// Query batches with pagination and filtering
    pub async fn list_batches(
        db: &DatabaseConnection,
        filters: BatchFilters,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<(Vec<batch::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(status) = filters.status {
            condition = condition.add(batch::Column::Status.eq(status));
        }

        if let Some(course_id) = filters.course_id {
            condition = condition.add(batch::Column::CourseId.eq(course_id));
        }

        if let Some(instructor_id) = filters.instructor_id {
            condition = condition.add(batch::Column::InstructorId.eq(instructor_id));
        }

        if let Some(has_slots) = filters.has_available_slots {
            let open = Expr::col(batch::Column::CurrentEnrollment)
                .lt(Expr::col(batch::Column::Capacity));
            let full = Expr::col(batch::Column::CurrentEnrollment)
                .gte(Expr::col(batch::Column::Capacity));
            condition = condition.add(if has_slots { open } else { full });
        }

        if let Some(search) = filters.search {
            condition = condition.add(batch::Column::Name.like(format!("%{search}%")));
        }

        let query = batch::Entity::find()
            .filter(condition)
            .order_by_asc(batch::Column::StartDate);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let batches = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((batches, total_items))
    }

    /// Update non-ledger fields. Capacity, enrollment and status each have a
    /// dedicated checked operation and are never written here.
    pub async fn update_batch(
        db: &DatabaseConnection,
        id: Uuid,
        name: Option<String>,
        start_date: Option<NaiveDate>,
        instructor_id: Option<Uuid>,
    ) -> ServiceResult<batch::Model> {
        let existing = Self::get_batch(db, id).await?;

        if let Some(instructor_id) = instructor_id {
            employee::Entity::find_by_id(instructor_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Employee", instructor_id))?;
        }

        let course_duration = course::Entity::find_by_id(existing.course_id)
            .one(db)
            .await?
            .map(|course| course.duration_months)
            .unwrap_or_default();

        let mut active = existing.into_active_model();

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(ServiceError::Validation("batch name is required".to_string()));
            }
            active.name = Set(name);
        }

        if let Some(start_date) = start_date {
            active.start_date = Set(start_date);
            active.end_date = Set(Self::end_date_for(start_date, course_duration));
        }

        if let Some(instructor_id) = instructor_id {
            active.instructor_id = Set(Some(instructor_id));
        }

        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// Change batch capacity. Applied as a single conditional UPDATE so the
    /// capacity can never drop below the enrollment the row holds at the
    /// moment the statement runs.
    pub async fn update_capacity(
        db: &DatabaseConnection,
        batch_id: Uuid,
        new_capacity: i32,
    ) -> ServiceResult<batch::Model> {
        if new_capacity < 1 {
            return Err(ServiceError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }

        let result = batch::Entity::update_many()
            .col_expr(batch::Column::Capacity, Expr::value(new_capacity))
            .col_expr(
                batch::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(batch::Column::Id.eq(batch_id))
            .filter(batch::Column::CurrentEnrollment.lte(new_capacity))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            let batch = Self::get_batch(db, batch_id).await?;
            return Err(ServiceError::CapacityExceeded(format!(
                "new capacity {new_capacity} is below current enrollment {}",
                batch.current_enrollment
            )));
        }

        Self::get_batch(db, batch_id).await
    }

    /// Claim one slot. The check and the increment are one UPDATE statement;
    /// concurrent claims against the last slot serialize on the row and the
    /// losers match zero rows.
    pub async fn increment_enrollment<C: ConnectionTrait>(
        conn: &C,
        batch_id: Uuid,
    ) -> ServiceResult<batch::Model> {
        let result = batch::Entity::update_many()
            .col_expr(
                batch::Column::CurrentEnrollment,
                Expr::col(batch::Column::CurrentEnrollment).add(1),
            )
            .col_expr(
                batch::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(batch::Column::Id.eq(batch_id))
            .filter(
                Expr::col(batch::Column::CurrentEnrollment)
                    .lt(Expr::col(batch::Column::Capacity)),
            )
            .filter(batch::Column::Status.is_in([BatchStatus::Planned, BatchStatus::Active]))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            // The guarded update matched nothing; classify the refusal
            let batch = Self::find_on(conn, batch_id).await?;
            if !batch.status.accepts_enrollment() {
                return Err(ServiceError::State(format!(
                    "batch {} is {} and not accepting enrollments",
                    batch.name, batch.status
                )));
            }
            return Err(ServiceError::CapacityExceeded(format!(
                "batch {} is full ({}/{})",
                batch.name, batch.current_enrollment, batch.capacity
            )));
        }

        let batch = Self::find_on(conn, batch_id).await?;
        log::debug!(
            "batch {} enrollment now {}/{}",
            batch.name,
            batch.current_enrollment,
            batch.capacity
        );
        Ok(batch)
    }

    /// Release one slot, guarded against going below zero
    pub async fn decrement_enrollment<C: ConnectionTrait>(
        conn: &C,
        batch_id: Uuid,
    ) -> ServiceResult<batch::Model> {
        let result = batch::Entity::update_many()
            .col_expr(
                batch::Column::CurrentEnrollment,
                Expr::col(batch::Column::CurrentEnrollment).sub(1),
            )
            .col_expr(
                batch::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(batch::Column::Id.eq(batch_id))
            .filter(Expr::col(batch::Column::CurrentEnrollment).gt(0))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            let batch = Self::find_on(conn, batch_id).await?;
            return Err(ServiceError::State(format!(
                "batch {} has no enrollment to release",
                batch.name
            )));
        }

        Self::find_on(conn, batch_id).await
    }

    pub async fn available_slots(db: &DatabaseConnection, batch_id: Uuid) -> ServiceResult<i32> {
        Ok(Self::get_batch(db, batch_id).await?.available_slots())
    }

    pub async fn has_available_capacity(
        db: &DatabaseConnection,
        batch_id: Uuid,
    ) -> ServiceResult<bool> {
        Ok(Self::get_batch(db, batch_id).await?.has_available_slots())
    }

    pub async fn update_status(
        db: &DatabaseConnection,
        batch_id: Uuid,
        new_status: BatchStatus,
    ) -> ServiceResult<batch::Model> {
        let batch = Self::get_batch(db, batch_id).await?;

        if batch.status == new_status {
            return Ok(batch);
        }
        if !batch.status.can_transition(new_status) {
            return Err(ServiceError::State(format!(
                "cannot move batch from {} to {}",
                batch.status, new_status
            )));
        }

        let mut active = batch.into_active_model();
        active.status = Set(new_status);
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// Deleting is refused while any student remains enrolled. The guard and
    /// the delete are one statement for the same reason the ledger updates
    /// are.
    pub async fn delete_batch(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let result = batch::Entity::delete_many()
            .filter(batch::Column::Id.eq(id))
            .filter(batch::Column::CurrentEnrollment.eq(0))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            let batch = Self::get_batch(db, id).await?;
            return Err(ServiceError::Conflict(format!(
                "cannot delete batch {} with {} enrolled students",
                batch.name, batch.current_enrollment
            )));
        }

        Ok(())
    }

    async fn find_on<C: ConnectionTrait>(conn: &C, batch_id: Uuid) -> ServiceResult<batch::Model> {
        batch::Entity::find_by_id(batch_id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Batch", batch_id))
    }
}

#[cfg(test)]
mod tests {
    use super::BatchService;
    use crate::entities::batch;
    use crate::error::ServiceError;
    use chrono::{NaiveDate, NaiveDateTime};
    use models::batch_status::BatchStatus;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    fn batch_row(capacity: i32, current_enrollment: i32, status: BatchStatus) -> batch::Model {
        batch::Model {
            id: Uuid::new_v4(),
            name: "RUST-2026-A".to_string(),
            course_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: None,
            capacity,
            current_enrollment,
            status,
            instructor_id: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[tokio::test]
    async fn test_create_batch_rejects_capacity_below_one() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = BatchService::create_batch(
            &db,
            "RUST-2026-A".to_string(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            0,
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_increment_succeeds_while_slots_remain() {
        let updated = batch_row(5, 4, BatchStatus::Active);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![updated.clone()]])
            .into_connection();

        let batch = BatchService::increment_enrollment(&db, updated.id)
            .await
            .unwrap();
        assert_eq!(batch.current_enrollment, 4);
        assert_eq!(batch.available_slots(), 1);
    }

    #[tokio::test]
    async fn test_increment_on_full_batch_is_capacity_exceeded() {
        let full = batch_row(5, 5, BatchStatus::Active);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![full.clone()]])
            .into_connection();

        let err = BatchService::increment_enrollment(&db, full.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::CapacityExceeded(_)));
    }

    #[tokio::test]
    async fn test_increment_on_closed_batch_is_state_error() {
        let cancelled = batch_row(5, 2, BatchStatus::Cancelled);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![cancelled.clone()]])
            .into_connection();

        let err = BatchService::increment_enrollment(&db, cancelled.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::State(_)));
    }

    #[tokio::test]
    async fn test_increment_on_missing_batch_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([Vec::<batch::Model>::new()])
            .into_connection();

        let err = BatchService::increment_enrollment(&db, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_decrement_at_zero_is_state_error() {
        let empty = batch_row(5, 0, BatchStatus::Active);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![empty.clone()]])
            .into_connection();

        let err = BatchService::decrement_enrollment(&db, empty.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::State(_)));
    }

    #[tokio::test]
    async fn test_capacity_below_enrollment_is_rejected() {
        let batch = batch_row(10, 8, BatchStatus::Active);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![batch.clone()]])
            .into_connection();

        let err = BatchService::update_capacity(&db, batch.id, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::CapacityExceeded(_)));
    }

    #[tokio::test]
    async fn test_capacity_update_with_same_value_is_a_noop() {
        let batch = batch_row(10, 8, BatchStatus::Active);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![batch.clone()]])
            .into_connection();

        let unchanged = BatchService::update_capacity(&db, batch.id, 10)
            .await
            .unwrap();
        assert_eq!(unchanged.capacity, 10);
        assert_eq!(unchanged.current_enrollment, 8);
    }

    #[tokio::test]
    async fn test_delete_with_enrollment_is_a_conflict() {
        let enrolled = batch_row(10, 3, BatchStatus::Active);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![enrolled.clone()]])
            .into_connection();

        let err = BatchService::delete_batch(&db, enrolled.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_status_transition_out_of_terminal_is_rejected() {
        let completed = batch_row(10, 0, BatchStatus::Completed);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![completed.clone()]])
            .into_connection();

        let err = BatchService::update_status(&db, completed.id, BatchStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::State(_)));
    }
}
