use crate::dtos::common::{PaginationMeta, default_page, default_per_page};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct PlacementResponse {
    pub id: String,
    pub student_id: String,
    pub company_id: String,
    pub position: String,
    pub salary: Option<Decimal>,
    pub placement_date: NaiveDate,
    pub status: String,
    pub probation_period_months: Option<i32>,
    pub joining_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub is_in_probation: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedPlacementsResponse {
    pub placements: Vec<PlacementResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePlacementRequest {
    pub student_id: Uuid,
    pub company_id: Uuid,
    pub position: String,
    pub salary: Option<Decimal>,
    pub placement_date: NaiveDate,
    pub probation_period_months: Option<i32>,
    pub joining_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClosePlacementRequest {
    pub status: String,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PlacementQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub status: Option<String>,
    pub student_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
}
