use crate::dtos::common::{PaginationMeta, default_page, default_per_page};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResponse {
    pub id: String,
    pub name: String,
    pub course_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub capacity: i32,
    pub current_enrollment: i32,
    pub available_slots: i32,
    pub utilization_percentage: f64,
    pub status: String,
    pub instructor_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedBatchesResponse {
    pub batches: Vec<BatchResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableSlotsResponse {
    pub batch_id: String,
    pub available_slots: i32,
    pub has_available_slots: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBatchRequest {
    pub name: String,
    pub course_id: Uuid,
    pub start_date: NaiveDate,
    pub capacity: i32,
    pub instructor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBatchRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub instructor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCapacityRequest {
    pub capacity: i32,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct BatchQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub status: Option<String>,
    pub course_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub has_available_slots: Option<bool>,
    pub search: Option<String>,
}
