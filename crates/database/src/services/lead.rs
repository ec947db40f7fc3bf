use crate::entities::{employee, lead, lead_follow_up, student};
use crate::error::{ServiceError, ServiceResult};
use crate::services::student::{CreateStudent, StudentService};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use models::{follow_up, lead_status::LeadStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateLead {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub course_interest: Option<String>,
    pub source: Option<String>,
    pub assigned_counsellor_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateLead {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub course_interest: Option<String>,
    pub source: Option<String>,
    pub assigned_counsellor_id: Option<Uuid>,
    pub notes: Option<String>,
}

/// Input for the lead -> student conversion workflow
#[derive(Debug, Clone)]
pub struct ConvertLead {
    pub enrollment_date: NaiveDate,
    pub batch_id: Option<Uuid>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Optional filters for lead listings
#[derive(Debug, Default)]
pub struct LeadFilters {
    pub status: Option<LeadStatus>,
    pub source: Option<String>,
    pub counsellor_id: Option<Uuid>,
    pub search: Option<String>,
}

pub struct LeadService;

impl LeadService {
    pub async fn create_lead(
        db: &DatabaseConnection,
        request: CreateLead,
    ) -> ServiceResult<lead::Model> {
        if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "first and last name are required".to_string(),
            ));
        }
        if request.phone.trim().is_empty() {
            return Err(ServiceError::Validation("phone number is required".to_string()));
        }

        if let Some(email) = &request.email {
            let duplicates = lead::Entity::find()
                .filter(lead::Column::Email.eq(email))
                .count(db)
                .await?;
            if duplicates > 0 {
                return Err(ServiceError::Conflict(format!(
                    "lead with email {email} already exists"
                )));
            }
        }

        if let Some(counsellor_id) = request.assigned_counsellor_id {
            employee::Entity::find_by_id(counsellor_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Employee", counsellor_id))?;
        }

        let now = Utc::now().naive_utc();
        let new_lead = lead::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            email: Set(request.email),
            phone: Set(request.phone),
            course_interest: Set(request.course_interest),
            source: Set(request.source),
            status: Set(LeadStatus::New),
            assigned_counsellor_id: Set(request.assigned_counsellor_id),
            converted_date: Set(None),
            notes: Set(request.notes),
            next_follow_up_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(new_lead.insert(db).await?)
    }

    pub async fn get_lead(db: &DatabaseConnection, id: Uuid) -> ServiceResult<lead::Model> {
        lead::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Lead", id))
    }

    /// Query leads with pagination and filtering
    pub async fn list_leads(
        db: &DatabaseConnection,
        filters: LeadFilters,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<(Vec<lead::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(status) = filters.status {
            condition = condition.add(lead::Column::Status.eq(status));
        }

        if let Some(source) = filters.source {
            condition = condition.add(lead::Column::Source.eq(source));
        }

        if let Some(counsellor_id) = filters.counsellor_id {
            condition = condition.add(lead::Column::AssignedCounsellorId.eq(counsellor_id));
        }

        if let Some(search) = filters.search {
            let pattern = format!("%{search}%");
            condition = condition.add(
                Condition::any()
                    .add(lead::Column::FirstName.like(&pattern))
                    .add(lead::Column::LastName.like(&pattern))
                    .add(lead::Column::Phone.like(&pattern)),
            );
        }

        let query = lead::Entity::find()
            .filter(condition)
            .order_by_desc(lead::Column::CreatedAt);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let leads = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((leads, total_items))
    }

    /// Contact and assignment edits. A converted lead is immutable.
    pub async fn update_lead(
        db: &DatabaseConnection,
        id: Uuid,
        request: UpdateLead,
    ) -> ServiceResult<lead::Model> {
        let existing = Self::get_lead(db, id).await?;

        if existing.is_converted() {
            return Err(ServiceError::Conflict(
                "cannot update a converted lead".to_string(),
            ));
        }

        if let Some(counsellor_id) = request.assigned_counsellor_id {
            employee::Entity::find_by_id(counsellor_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Employee", counsellor_id))?;
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
        if let Some(course_interest) = request.course_interest {
            active.course_interest = Set(Some(course_interest));
        }
        if let Some(source) = request.source {
            active.source = Set(Some(source));
        }
        if let Some(counsellor_id) = request.assigned_counsellor_id {
            active.assigned_counsellor_id = Set(Some(counsellor_id));
        }
        if let Some(notes) = request.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// Checked status change. CONVERTED is only reachable through the
    /// conversion workflow.
    pub async fn update_status(
        db: &DatabaseConnection,
        id: Uuid,
        new_status: LeadStatus,
    ) -> ServiceResult<lead::Model> {
        let lead = Self::get_lead(db, id).await?;

        if lead.status == new_status {
            return Ok(lead);
        }
        if new_status == LeadStatus::Converted {
            return Err(ServiceError::Conflict(
                "leads are converted through the conversion workflow".to_string(),
            ));
        }
        if !lead.status.can_transition(new_status) {
            return Err(ServiceError::State(format!(
                "cannot move lead from {} to {}",
                lead.status, new_status
            )));
        }

        let mut active = lead.into_active_model();
        active.status = Set(new_status);
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// Append a follow-up entry and update the lead's next-follow-up
    /// bookkeeping
    pub async fn add_follow_up(
        db: &DatabaseConnection,
        lead_id: Uuid,
        notes: String,
        next_follow_up_date: Option<NaiveDateTime>,
    ) -> ServiceResult<lead::Model> {
        let txn = db.begin().await?;

        let lead = lead::Entity::find_by_id(lead_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Lead", lead_id))?;

        if lead.is_converted() {
            return Err(ServiceError::Conflict(
                "cannot add follow-up to a converted lead".to_string(),
            ));
        }

        let entry = lead_follow_up::ActiveModel {
            id: Set(Uuid::new_v4()),
            lead_id: Set(lead_id),
            follow_up_date: Set(Utc::now().naive_utc()),
            notes: Set(Some(notes)),
            next_action: Set(follow_up::next_action(next_follow_up_date)),
        };
        entry.insert(&txn).await?;

        let mut active = lead.into_active_model();
        active.next_follow_up_date = Set(next_follow_up_date);
        active.updated_at = Set(Utc::now().naive_utc());
        let lead = active.update(&txn).await?;

        txn.commit().await?;
        Ok(lead)
    }

    pub async fn follow_ups(
        db: &DatabaseConnection,
        lead_id: Uuid,
    ) -> ServiceResult<Vec<lead_follow_up::Model>> {
        Self::get_lead(db, lead_id).await?;

        Ok(lead_follow_up::Entity::find()
            .filter(lead_follow_up::Column::LeadId.eq(lead_id))
            .order_by_asc(lead_follow_up::Column::FollowUpDate)
            .all(db)
            .await?)
    }

    /// Leads whose next follow-up is due on or before the given moment
    pub async fn leads_requiring_follow_up(
        db: &DatabaseConnection,
        as_of: NaiveDateTime,
    ) -> ServiceResult<Vec<lead::Model>> {
        Ok(lead::Entity::find()
            .filter(lead::Column::NextFollowUpDate.lte(as_of))
            .filter(lead::Column::Status.is_in([
                LeadStatus::New,
                LeadStatus::Contacted,
                LeadStatus::Interested,
            ]))
            .order_by_asc(lead::Column::NextFollowUpDate)
            .all(db)
            .await?)
    }

    /// Convert a lead into a student. One transaction covers the ledger
    /// increment, the student insert and the lead's terminal status write;
    /// any failure rolls the whole operation back.
    pub async fn convert_to_student(
        db: &DatabaseConnection,
        lead_id: Uuid,
        request: ConvertLead,
    ) -> ServiceResult<student::Model> {
        let txn = db.begin().await?;

        let lead = lead::Entity::find_by_id(lead_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Lead", lead_id))?;

        if lead.is_converted() {
            return Err(ServiceError::Conflict("lead is already converted".to_string()));
        }
        if lead.status.is_terminal() {
            return Err(ServiceError::Conflict(format!(
                "cannot convert lead with status {}",
                lead.status
            )));
        }

        let student = StudentService::create_student_in_txn(
            &txn,
            CreateStudent {
                first_name: lead.first_name.clone(),
                last_name: lead.last_name.clone(),
                email: lead.email.clone(),
                phone: lead.phone.clone(),
                date_of_birth: request.date_of_birth,
                address: request.address,
                enrollment_date: request.enrollment_date,
                batch_id: request.batch_id,
                lead_id: Some(lead.id),
            },
        )
        .await?;

        let now = Utc::now().naive_utc();
        let mut active = lead.into_active_model();
        active.status = Set(LeadStatus::Converted);
        active.converted_date = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;
        log::info!(
            "lead {lead_id} converted to student {}",
            student.enrollment_number
        );
        Ok(student)
    }

    /// A converted lead is part of the enrollment record and is never
    /// deleted
    pub async fn delete_lead(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let lead = Self::get_lead(db, id).await?;

        if lead.is_converted() {
            return Err(ServiceError::Conflict(
                "cannot delete a converted lead".to_string(),
            ));
        }

        lead::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConvertLead, LeadService};
    use crate::entities::{batch, lead};
    use crate::error::ServiceError;
    use chrono::{NaiveDate, NaiveDateTime};
    use models::{batch_status::BatchStatus, lead_status::LeadStatus};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn lead_row(status: LeadStatus) -> lead::Model {
        lead::Model {
            id: Uuid::new_v4(),
            first_name: "Arjun".to_string(),
            last_name: "Mehta".to_string(),
            email: None,
            phone: "9123456780".to_string(),
            course_interest: Some("Rust Development".to_string()),
            source: Some("Website".to_string()),
            status,
            assigned_counsellor_id: None,
            converted_date: None,
            notes: None,
            next_follow_up_date: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn full_batch() -> batch::Model {
        batch::Model {
            id: Uuid::new_v4(),
            name: "RUST-2026-A".to_string(),
            course_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: None,
            capacity: 5,
            current_enrollment: 5,
            status: BatchStatus::Active,
            instructor_id: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn conversion_request(batch_id: Option<Uuid>) -> ConvertLead {
        ConvertLead {
            enrollment_date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            batch_id,
            address: None,
            date_of_birth: None,
        }
    }

    fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
    }

    #[tokio::test]
    async fn test_converting_a_converted_lead_is_a_conflict() {
        let converted = lead_row(LeadStatus::Converted);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![converted.clone()]])
            .into_connection();

        let err = LeadService::convert_to_student(&db, converted.id, conversion_request(None))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_converting_a_lost_lead_is_a_conflict() {
        let lost = lead_row(LeadStatus::Lost);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lost.clone()]])
            .into_connection();

        let err = LeadService::convert_to_student(&db, lost.id, conversion_request(None))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_conversion_against_a_full_batch_aborts_whole_operation() {
        let lead = lead_row(LeadStatus::Interested);
        let batch = full_batch();

        // Query order inside the transaction: the lead load, the duplicate
        // phone count, the lead back-reference check, then the failed ledger
        // increment and its classifying refetch. Nothing beyond that point
        // may touch the database.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lead.clone()]])
            .append_query_results([vec![count_row(0)]])
            .append_query_results([vec![lead.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![batch.clone()]])
            .into_connection();

        let err = LeadService::convert_to_student(&db, lead.id, conversion_request(Some(batch.id)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::CapacityExceeded(_)));

        // The transaction never reached the student insert or the lead
        // update; had it tried, the mock would have failed on missing
        // results rather than returning the capacity error
        let log = db.into_transaction_log();
        assert!(
            !log.iter().any(|txn| format!("{txn:?}").contains("INSERT INTO \"students\"")),
            "no student row may be written when the batch is full"
        );
    }

    #[tokio::test]
    async fn test_follow_up_on_converted_lead_is_a_conflict() {
        let converted = lead_row(LeadStatus::Converted);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![converted.clone()]])
            .into_connection();

        let err = LeadService::add_follow_up(&db, converted.id, "call back".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_on_converted_lead_is_a_conflict() {
        let converted = lead_row(LeadStatus::Converted);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![converted.clone()]])
            .into_connection();

        let err = LeadService::update_lead(&db, converted.id, Default::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_on_converted_lead_is_a_conflict() {
        let converted = lead_row(LeadStatus::Converted);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![converted.clone()]])
            .into_connection();

        let err = LeadService::delete_lead(&db, converted.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_status_update_cannot_mark_converted() {
        let interested = lead_row(LeadStatus::Interested);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![interested.clone()]])
            .into_connection();

        let err = LeadService::update_status(&db, interested.id, LeadStatus::Converted)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_terminal_lead_status_is_sealed() {
        let lost = lead_row(LeadStatus::NotInterested);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lost.clone()]])
            .into_connection();

        let err = LeadService::update_status(&db, lost.id, LeadStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::State(_)));
    }
}
