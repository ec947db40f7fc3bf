use crate::dtos::common::{PaginationMeta, default_page, default_per_page};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: String,
    pub enrollment_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub batch_id: Option<String>,
    pub status: String,
    pub enrollment_date: NaiveDate,
    pub lead_id: Option<String>,
    pub graduation_date: Option<NaiveDate>,
    pub final_grade: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub students: Vec<StudentResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusHistoryResponse {
    pub status: String,
    pub change_date: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub enrollment_date: NaiveDate,
    pub batch_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignBatchRequest {
    pub batch_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStudentStatusRequest {
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GraduateRequest {
    pub final_grade: String,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct StudentQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub status: Option<String>,
    pub batch_id: Option<Uuid>,

    /// When true, only students without a batch assignment
    #[serde(default)]
    pub unassigned: bool,

    pub search: Option<String>,
}
