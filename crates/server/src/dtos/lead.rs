use crate::dtos::common::{PaginationMeta, default_page, default_per_page};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct LeadResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub course_interest: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub assigned_counsellor_id: Option<String>,
    pub converted_date: Option<NaiveDateTime>,
    pub notes: Option<String>,
    pub next_follow_up_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedLeadsResponse {
    pub leads: Vec<LeadResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowUpResponse {
    pub follow_up_date: NaiveDateTime,
    pub notes: Option<String>,
    pub next_action: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLeadRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub course_interest: Option<String>,
    pub source: Option<String>,
    pub assigned_counsellor_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLeadRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub course_interest: Option<String>,
    pub source: Option<String>,
    pub assigned_counsellor_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFollowUpRequest {
    pub notes: String,
    pub next_follow_up_date: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConvertLeadRequest {
    pub enrollment_date: NaiveDate,
    pub batch_id: Option<Uuid>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct LeadQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub status: Option<String>,
    pub source: Option<String>,
    pub counsellor_id: Option<Uuid>,
    pub search: Option<String>,
}
