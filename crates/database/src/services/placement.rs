use crate::entities::{company, placement, student};
use crate::error::{ServiceError, ServiceResult};
use chrono::{NaiveDate, Utc};
use models::placement_status::PlacementStatus;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreatePlacement {
    pub student_id: Uuid,
    pub company_id: Uuid,
    pub position: String,
    pub salary: Option<Decimal>,
    pub placement_date: NaiveDate,
    pub probation_period_months: Option<i32>,
    pub joining_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Optional filters for placement listings
#[derive(Debug, Default)]
pub struct PlacementFilters {
    pub status: Option<PlacementStatus>,
    pub student_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
}

pub struct PlacementService;

impl PlacementService {
    pub async fn create_placement(
        db: &DatabaseConnection,
        request: CreatePlacement,
    ) -> ServiceResult<placement::Model> {
        if request.position.trim().is_empty() {
            return Err(ServiceError::Validation("position is required".to_string()));
        }
        if let Some(salary) = request.salary
            && salary <= Decimal::ZERO
        {
            return Err(ServiceError::Validation(
                "salary must be greater than zero".to_string(),
            ));
        }
        if let Some(months) = request.probation_period_months
            && !(0..=24).contains(&months)
        {
            return Err(ServiceError::Validation(
                "probation period must be between 0 and 24 months".to_string(),
            ));
        }

        student::Entity::find_by_id(request.student_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", request.student_id))?;

        company::Entity::find_by_id(request.company_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Company", request.company_id))?;

        let now = Utc::now().naive_utc();
        let new_placement = placement::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(request.student_id),
            company_id: Set(request.company_id),
            position: Set(request.position),
            salary: Set(request.salary),
            placement_date: Set(request.placement_date),
            status: Set(PlacementStatus::Placed),
            probation_period_months: Set(request.probation_period_months),
            joining_date: Set(request.joining_date),
            end_date: Set(None),
            notes: Set(request.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(new_placement.insert(db).await?)
    }

    pub async fn get_placement(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> ServiceResult<placement::Model> {
        placement::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Placement", id))
    }

    /// Query placements with pagination and filtering
    pub async fn list_placements(
        db: &DatabaseConnection,
        filters: PlacementFilters,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<(Vec<placement::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(status) = filters.status {
            condition = condition.add(placement::Column::Status.eq(status));
        }

        if let Some(student_id) = filters.student_id {
            condition = condition.add(placement::Column::StudentId.eq(student_id));
        }

        if let Some(company_id) = filters.company_id {
            condition = condition.add(placement::Column::CompanyId.eq(company_id));
        }

        let query = placement::Entity::find()
            .filter(condition)
            .order_by_desc(placement::Column::PlacementDate);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let placements = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((placements, total_items))
    }

    /// Close a placement. Every transition out of PLACED is terminal and
    /// records the end date.
    pub async fn update_status(
        db: &DatabaseConnection,
        id: Uuid,
        new_status: PlacementStatus,
        end_date: Option<NaiveDate>,
    ) -> ServiceResult<placement::Model> {
        let placement = Self::get_placement(db, id).await?;

        if placement.status == new_status {
            return Ok(placement);
        }
        if !placement.status.can_transition(new_status) {
            return Err(ServiceError::State(format!(
                "cannot move placement from {} to {}",
                placement.status, new_status
            )));
        }

        let mut active = placement.into_active_model();
        active.status = Set(new_status);
        active.end_date = Set(Some(end_date.unwrap_or_else(|| Utc::now().date_naive())));
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// PLACED placements whose end date has not passed
    pub async fn active_placements(
        db: &DatabaseConnection,
    ) -> ServiceResult<Vec<placement::Model>> {
        let today = Utc::now().date_naive();

        let placed = placement::Entity::find()
            .filter(placement::Column::Status.eq(PlacementStatus::Placed))
            .order_by_desc(placement::Column::PlacementDate)
            .all(db)
            .await?;

        Ok(placed
            .into_iter()
            .filter(|placement| placement.is_active(today))
            .collect())
    }

    pub async fn delete_placement(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        Self::get_placement(db, id).await?;
        placement::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PlacementService;
    use crate::entities::placement;
    use crate::error::ServiceError;
    use chrono::{NaiveDate, NaiveDateTime};
    use models::placement_status::PlacementStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn placement_row(status: PlacementStatus) -> placement::Model {
        placement::Model {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            position: "Backend Engineer".to_string(),
            salary: None,
            placement_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            status,
            probation_period_months: None,
            joining_date: None,
            end_date: None,
            notes: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[tokio::test]
    async fn test_closed_placement_cannot_move_again() {
        let resigned = placement_row(PlacementStatus::Resigned);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![resigned.clone()]])
            .into_connection();

        let err = PlacementService::update_status(&db, resigned.id, PlacementStatus::Completed, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::State(_)));
    }

    #[tokio::test]
    async fn test_probation_months_are_bounded() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = PlacementService::create_placement(
            &db,
            super::CreatePlacement {
                student_id: Uuid::new_v4(),
                company_id: Uuid::new_v4(),
                position: "Backend Engineer".to_string(),
                salary: None,
                placement_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
                probation_period_months: Some(36),
                joining_date: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
