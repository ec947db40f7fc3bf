use crate::entities::{lead, student, student_status_history};
use crate::error::{ServiceError, ServiceResult};
use crate::services::batch::BatchService;
use chrono::{Datelike, NaiveDate, Utc};
use models::{enrollment, student_status::StudentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

/// Input for student creation, both direct and through lead conversion
#[derive(Debug, Clone)]
pub struct CreateStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub enrollment_date: NaiveDate,
    pub batch_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
}

/// Contact-detail updates; status and graduation fields go through their
/// checked operations instead
#[derive(Debug, Clone, Default)]
pub struct UpdateStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

/// Optional filters for student listings
#[derive(Debug, Default)]
pub struct StudentFilters {
    pub status: Option<StudentStatus>,
    pub batch_id: Option<Uuid>,
    pub unassigned: bool,
    pub search: Option<String>,
}

pub struct StudentService;

impl StudentService {
    pub async fn create_student(
        db: &DatabaseConnection,
        request: CreateStudent,
    ) -> ServiceResult<student::Model> {
        let txn = db.begin().await?;
        let student = Self::create_student_in_txn(&txn, request).await?;
        txn.commit().await?;
        Ok(student)
    }

    /// Creation body, callable from an enclosing transaction (the lead
    /// conversion workflow runs this together with the lead update). When a
    /// batch is requested the ledger increment happens first; its failure
    /// aborts the whole operation with nothing persisted.
    pub(crate) async fn create_student_in_txn<C: ConnectionTrait>(
        conn: &C,
        request: CreateStudent,
    ) -> ServiceResult<student::Model> {
        if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "first and last name are required".to_string(),
            ));
        }
        if request.phone.trim().is_empty() {
            return Err(ServiceError::Validation("phone number is required".to_string()));
        }

        if let Some(email) = &request.email {
            let duplicates = student::Entity::find()
                .filter(student::Column::Email.eq(email))
                .count(conn)
                .await?;
            if duplicates > 0 {
                return Err(ServiceError::Conflict(format!(
                    "student with email {email} already exists"
                )));
            }
        }

        let phone_duplicates = student::Entity::find()
            .filter(student::Column::Phone.eq(&request.phone))
            .count(conn)
            .await?;
        if phone_duplicates > 0 {
            return Err(ServiceError::Conflict(format!(
                "student with phone {} already exists",
                request.phone
            )));
        }

        if let Some(lead_id) = request.lead_id {
            lead::Entity::find_by_id(lead_id)
                .one(conn)
                .await?
                .ok_or_else(|| ServiceError::not_found("Lead", lead_id))?;
        }

        if let Some(batch_id) = request.batch_id {
            BatchService::increment_enrollment(conn, batch_id).await?;
        }

        let enrollment_number = Self::generate_enrollment_number(conn).await?;
        let now = Utc::now().naive_utc();
        let student_id = Uuid::new_v4();

        let new_student = student::ActiveModel {
            id: Set(student_id),
            enrollment_number: Set(enrollment_number),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            email: Set(request.email),
            phone: Set(request.phone),
            date_of_birth: Set(request.date_of_birth),
            address: Set(request.address),
            batch_id: Set(request.batch_id),
            status: Set(StudentStatus::Active),
            enrollment_date: Set(request.enrollment_date),
            lead_id: Set(request.lead_id),
            graduation_date: Set(None),
            final_grade: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let student = new_student.insert(conn).await?;

        Self::record_status(conn, student_id, StudentStatus::Active, "Student enrolled").await?;

        Ok(student)
    }

    /// Next free number under this year's ENR prefix
    async fn generate_enrollment_number<C: ConnectionTrait>(conn: &C) -> ServiceResult<String> {
        let prefix = enrollment::prefix_for_year(Utc::now().year());

        let existing: Vec<String> = student::Entity::find()
            .select_only()
            .column(student::Column::EnrollmentNumber)
            .filter(student::Column::EnrollmentNumber.starts_with(&prefix))
            .into_tuple()
            .all(conn)
            .await?;

        let sequence = enrollment::next_sequence(&prefix, &existing);
        Ok(enrollment::format_number(&prefix, sequence))
    }

    async fn record_status<C: ConnectionTrait>(
        conn: &C,
        student_id: Uuid,
        status: StudentStatus,
        notes: &str,
    ) -> ServiceResult<()> {
        let entry = student_status_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            status: Set(status),
            change_date: Set(Utc::now().naive_utc()),
            notes: Set(Some(notes.to_string())),
        };
        entry.insert(conn).await?;
        Ok(())
    }

    pub async fn get_student(db: &DatabaseConnection, id: Uuid) -> ServiceResult<student::Model> {
        student::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", id))
    }

    /// Query students with pagination and filtering
    pub async fn list_students(
        db: &DatabaseConnection,
        filters: StudentFilters,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<(Vec<student::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(status) = filters.status {
            condition = condition.add(student::Column::Status.eq(status));
        }

        if let Some(batch_id) = filters.batch_id {
            condition = condition.add(student::Column::BatchId.eq(batch_id));
        }

        if filters.unassigned {
            condition = condition.add(student::Column::BatchId.is_null());
        }

        if let Some(search) = filters.search {
            let pattern = format!("%{search}%");
            condition = condition.add(
                Condition::any()
                    .add(student::Column::FirstName.like(&pattern))
                    .add(student::Column::LastName.like(&pattern))
                    .add(student::Column::EnrollmentNumber.like(&pattern)),
            );
        }

        let query = student::Entity::find()
            .filter(condition)
            .order_by_asc(student::Column::EnrollmentNumber);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let students = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((students, total_items))
    }

    pub async fn update_student(
        db: &DatabaseConnection,
        id: Uuid,
        request: UpdateStudent,
    ) -> ServiceResult<student::Model> {
        let existing = Self::get_student(db, id).await?;

        if let Some(email) = &request.email
            && existing.email.as_deref() != Some(email.as_str())
        {
            let duplicates = student::Entity::find()
                .filter(student::Column::Email.eq(email))
                .count(db)
                .await?;
            if duplicates > 0 {
                return Err(ServiceError::Conflict(format!(
                    "student with email {email} already exists"
                )));
            }
        }

        if let Some(phone) = &request.phone
            && existing.phone != *phone
        {
            let duplicates = student::Entity::find()
                .filter(student::Column::Phone.eq(phone))
                .count(db)
                .await?;
            if duplicates > 0 {
                return Err(ServiceError::Conflict(format!(
                    "student with phone {phone} already exists"
                )));
            }
        }

        let mut active = existing.into_active_model();

        if let Some(first_name) = request.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = request.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = request.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = request.phone {
            active.phone = Set(phone);
        }
        if let Some(date_of_birth) = request.date_of_birth {
            active.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(address) = request.address {
            active.address = Set(Some(address));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// Move a student between batches, keeping both ledgers consistent in
    /// one transaction
    pub async fn assign_to_batch(
        db: &DatabaseConnection,
        student_id: Uuid,
        batch_id: Uuid,
    ) -> ServiceResult<student::Model> {
        let txn = db.begin().await?;

        let student = student::Entity::find_by_id(student_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", student_id))?;

        if student.batch_id == Some(batch_id) {
            return Ok(student);
        }

        if let Some(old_batch_id) = student.batch_id {
            BatchService::decrement_enrollment(&txn, old_batch_id).await?;
        }
        BatchService::increment_enrollment(&txn, batch_id).await?;

        let mut active = student.into_active_model();
        active.batch_id = Set(Some(batch_id));
        active.updated_at = Set(Utc::now().naive_utc());
        let student = active.update(&txn).await?;

        txn.commit().await?;
        Ok(student)
    }

    pub async fn remove_from_batch(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> ServiceResult<student::Model> {
        let txn = db.begin().await?;

        let student = student::Entity::find_by_id(student_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", student_id))?;

        let Some(batch_id) = student.batch_id else {
            return Ok(student);
        };

        BatchService::decrement_enrollment(&txn, batch_id).await?;

        let mut active = student.into_active_model();
        active.batch_id = Set(None);
        active.updated_at = Set(Utc::now().naive_utc());
        let student = active.update(&txn).await?;

        txn.commit().await?;
        Ok(student)
    }

    /// Checked status change. Graduation carries extra required fields and
    /// has its own operation.
    pub async fn update_status(
        db: &DatabaseConnection,
        student_id: Uuid,
        new_status: StudentStatus,
        notes: Option<String>,
    ) -> ServiceResult<student::Model> {
        let txn = db.begin().await?;

        let student = student::Entity::find_by_id(student_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", student_id))?;

        if student.status == new_status {
            return Ok(student);
        }
        if new_status == StudentStatus::Graduated {
            return Err(ServiceError::Validation(
                "graduation requires a final grade; use the graduate operation".to_string(),
            ));
        }
        if !student.status.can_transition(new_status) {
            return Err(ServiceError::State(format!(
                "cannot move student from {} to {}",
                student.status, new_status
            )));
        }

        let mut active = student.into_active_model();
        active.status = Set(new_status);
        active.updated_at = Set(Utc::now().naive_utc());
        let student = active.update(&txn).await?;

        let notes = notes.unwrap_or_else(|| format!("Status changed to {new_status}"));
        Self::record_status(&txn, student_id, new_status, &notes).await?;

        txn.commit().await?;
        Ok(student)
    }

    /// The one-way ACTIVE -> GRADUATED transition; the only place graduation
    /// date and final grade are written
    pub async fn graduate(
        db: &DatabaseConnection,
        student_id: Uuid,
        final_grade: String,
    ) -> ServiceResult<student::Model> {
        if final_grade.trim().is_empty() {
            return Err(ServiceError::Validation("final grade is required".to_string()));
        }

        let txn = db.begin().await?;

        let student = student::Entity::find_by_id(student_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", student_id))?;

        if !student.status.can_transition(StudentStatus::Graduated) {
            return Err(ServiceError::State(format!(
                "cannot graduate student with status {}",
                student.status
            )));
        }

        let today = Utc::now().date_naive();
        let mut active = student.into_active_model();
        active.status = Set(StudentStatus::Graduated);
        active.graduation_date = Set(Some(today));
        active.final_grade = Set(Some(final_grade.clone()));
        active.updated_at = Set(Utc::now().naive_utc());
        let student = active.update(&txn).await?;

        Self::record_status(
            &txn,
            student_id,
            StudentStatus::Graduated,
            &format!("Student graduated with grade: {final_grade}"),
        )
        .await?;

        txn.commit().await?;
        log::info!("student {} graduated", student.enrollment_number);
        Ok(student)
    }

    pub async fn delete_student(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let txn = db.begin().await?;

        let student = student::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", id))?;

        if let Some(batch_id) = student.batch_id {
            BatchService::decrement_enrollment(&txn, batch_id).await?;
        }

        student::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn status_history(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> ServiceResult<Vec<student_status_history::Model>> {
        Self::get_student(db, student_id).await?;

        Ok(student_status_history::Entity::find()
            .filter(student_status_history::Column::StudentId.eq(student_id))
            .order_by_asc(student_status_history::Column::ChangeDate)
            .all(db)
            .await?)
    }

}

#[cfg(test)]
mod tests {
    use super::StudentService;
    use crate::entities::student;
    use crate::error::ServiceError;
    use chrono::{NaiveDate, NaiveDateTime};
    use models::student_status::StudentStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn student_row(status: StudentStatus) -> student::Model {
        student::Model {
            id: Uuid::new_v4(),
            enrollment_number: "ENR20260001".to_string(),
            first_name: "Priya".to_string(),
            last_name: "Sharma".to_string(),
            email: Some("priya.sharma@example.com".to_string()),
            phone: "9876543210".to_string(),
            date_of_birth: None,
            address: None,
            batch_id: None,
            status,
            enrollment_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            lead_id: None,
            graduation_date: None,
            final_grade: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[tokio::test]
    async fn test_graduating_a_graduated_student_is_rejected() {
        let graduated = student_row(StudentStatus::Graduated);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![graduated.clone()]])
            .into_connection();

        let err = StudentService::graduate(&db, graduated.id, "A".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::State(_)));
    }

    #[tokio::test]
    async fn test_graduation_requires_a_grade() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = StudentService::graduate(&db, Uuid::new_v4(), "  ".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_status_cannot_reach_graduated() {
        let active = student_row(StudentStatus::Active);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![active.clone()]])
            .into_connection();

        let err =
            StudentService::update_status(&db, active.id, StudentStatus::Graduated, None)
                .await
                .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_dropped_out_student_cannot_be_reactivated() {
        let dropped = student_row(StudentStatus::DroppedOut);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![dropped.clone()]])
            .into_connection();

        let err = StudentService::update_status(&db, dropped.id, StudentStatus::Active, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::State(_)));
    }

    #[tokio::test]
    async fn test_suspended_student_can_be_reactivated() {
        let suspended = student_row(StudentStatus::Suspended);
        let mut reactivated = suspended.clone();
        reactivated.status = StudentStatus::Active;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![suspended.clone()]])
            .append_query_results([vec![reactivated.clone()]])
            .append_query_results([vec![history_row(suspended.id)]])
            .into_connection();

        let student =
            StudentService::update_status(&db, suspended.id, StudentStatus::Active, None)
                .await
                .unwrap();
        assert_eq!(student.status, StudentStatus::Active);
    }

    fn history_row(student_id: Uuid) -> crate::entities::student_status_history::Model {
        crate::entities::student_status_history::Model {
            id: Uuid::new_v4(),
            student_id,
            status: StudentStatus::Active,
            change_date: NaiveDateTime::default(),
            notes: None,
        }
    }
}
