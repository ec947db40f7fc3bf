use crate::entities::{company, placement};
use crate::error::{ServiceError, ServiceResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateCompany {
    pub name: String,
    pub industry: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

pub struct CompanyService;

impl CompanyService {
    pub async fn create_company(
        db: &DatabaseConnection,
        request: CreateCompany,
    ) -> ServiceResult<company::Model> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::Validation("company name is required".to_string()));
        }

        let duplicates = company::Entity::find()
            .filter(company::Column::Name.eq(&request.name))
            .count(db)
            .await?;
        if duplicates > 0 {
            return Err(ServiceError::Conflict(format!(
                "company with name {} already exists",
                request.name
            )));
        }

        let now = Utc::now().naive_utc();
        let new_company = company::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            industry: Set(request.industry),
            contact_person: Set(request.contact_person),
            email: Set(request.email),
            address: Set(request.address),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(new_company.insert(db).await?)
    }

    pub async fn get_company(db: &DatabaseConnection, id: Uuid) -> ServiceResult<company::Model> {
        company::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Company", id))
    }

    pub async fn list_companies(
        db: &DatabaseConnection,
        industry: Option<String>,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<(Vec<company::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(industry) = industry {
            condition = condition.add(company::Column::Industry.eq(industry));
        }

        let query = company::Entity::find()
            .filter(condition)
            .order_by_asc(company::Column::Name);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let companies = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((companies, total_items))
    }

    /// A company with recorded placements is part of the placement history
    /// and cannot be removed
    pub async fn delete_company(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let company = Self::get_company(db, id).await?;

        let placements = placement::Entity::find()
            .filter(placement::Column::CompanyId.eq(id))
            .count(db)
            .await?;
        if placements > 0 {
            return Err(ServiceError::Conflict(format!(
                "cannot delete company {} with {placements} recorded placements",
                company.name
            )));
        }

        company::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
