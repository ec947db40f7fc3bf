use crate::dtos::common::{PaginationMeta, default_page, default_per_page};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedEmployeesResponse {
    pub employees: Vec<EmployeeResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: String,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct EmployeeQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub department: Option<String>,
}
