use crate::dtos::common::{PaginationMeta, default_page, default_per_page};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyResponse {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCompaniesResponse {
    pub companies: Vec<CompanyResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub industry: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CompanyQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub industry: Option<String>,
}
