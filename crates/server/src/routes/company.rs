use crate::dtos::common::PaginationMeta;
use crate::dtos::company::{
    CompanyQueryParams, CompanyResponse, CreateCompanyRequest, PaginatedCompaniesResponse,
};
use crate::error::ApiResult;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::{
    entities::company,
    services::company::{CompanyService, CreateCompany},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Register a partner company
#[utoipa::path(
    post,
    path = "/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Company name already registered")
    ),
    tag = "Companies"
)]
pub async fn create_company(
    State(db): State<DatabaseConnection>,
    Json(request): Json<CreateCompanyRequest>,
) -> ApiResult<(StatusCode, Json<CompanyResponse>)> {
    let company = CompanyService::create_company(
        &db,
        CreateCompany {
            name: request.name,
            industry: request.industry,
            contact_person: request.contact_person,
            email: request.email,
            address: request.address,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(company))))
}

/// Get paginated list of companies
#[utoipa::path(
    get,
    path = "/companies",
    params(CompanyQueryParams),
    responses(
        (status = 200, description = "List of companies", body = PaginatedCompaniesResponse)
    ),
    tag = "Companies"
)]
pub async fn get_companies(
    State(db): State<DatabaseConnection>,
    Query(params): Query<CompanyQueryParams>,
) -> ApiResult<Json<PaginatedCompaniesResponse>> {
    let (companies, total_items) =
        CompanyService::list_companies(&db, params.industry, params.page, params.per_page).await?;

    Ok(Json(PaginatedCompaniesResponse {
        companies: companies.into_iter().map(to_response).collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Get a specific company by ID
#[utoipa::path(
    get,
    path = "/companies/{id}",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company found", body = CompanyResponse),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies"
)]
pub async fn get_company_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CompanyResponse>> {
    let company = CompanyService::get_company(&db, id).await?;
    Ok(Json(to_response(company)))
}

/// Delete a company with no recorded placements
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Company has recorded placements")
    ),
    tag = "Companies"
)]
pub async fn delete_company(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    CompanyService::delete_company(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Helper function to convert database models to API responses
fn to_response(company: company::Model) -> CompanyResponse {
    CompanyResponse {
        id: company.id.to_string(),
        name: company.name,
        industry: company.industry,
        contact_person: company.contact_person,
        email: company.email,
        address: company.address,
    }
}
