use crate::dtos::common::PaginationMeta;
use crate::dtos::placement::{
    ClosePlacementRequest, CreatePlacementRequest, PaginatedPlacementsResponse,
    PlacementQueryParams, PlacementResponse,
};
use crate::error::{ApiResult, parse_status};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use database::{
    entities::placement,
    services::placement::{CreatePlacement, PlacementFilters, PlacementService},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Record a placement for a student with a partner company
#[utoipa::path(
    post,
    path = "/placements",
    request_body = CreatePlacementRequest,
    responses(
        (status = 201, description = "Placement recorded", body = PlacementResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Student or company not found")
    ),
    tag = "Placements"
)]
pub async fn create_placement(
    State(db): State<DatabaseConnection>,
    Json(request): Json<CreatePlacementRequest>,
) -> ApiResult<(StatusCode, Json<PlacementResponse>)> {
    let placement = PlacementService::create_placement(
        &db,
        CreatePlacement {
            student_id: request.student_id,
            company_id: request.company_id,
            position: request.position,
            salary: request.salary,
            placement_date: request.placement_date,
            probation_period_months: request.probation_period_months,
            joining_date: request.joining_date,
            notes: request.notes,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(placement))))
}

/// Get paginated list of placements
#[utoipa::path(
    get,
    path = "/placements",
    params(PlacementQueryParams),
    responses(
        (status = 200, description = "List of placements", body = PaginatedPlacementsResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Placements"
)]
pub async fn get_placements(
    State(db): State<DatabaseConnection>,
    Query(params): Query<PlacementQueryParams>,
) -> ApiResult<Json<PaginatedPlacementsResponse>> {
    let status = params.status.as_deref().map(parse_status).transpose()?;

    let filters = PlacementFilters {
        status,
        student_id: params.student_id,
        company_id: params.company_id,
    };

    let (placements, total_items) =
        PlacementService::list_placements(&db, filters, params.page, params.per_page).await?;

    Ok(Json(PaginatedPlacementsResponse {
        placements: placements.into_iter().map(to_response).collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Placements currently in force
#[utoipa::path(
    get,
    path = "/placements/active",
    responses(
        (status = 200, description = "Active placements", body = [PlacementResponse])
    ),
    tag = "Placements"
)]
pub async fn get_active_placements(
    State(db): State<DatabaseConnection>,
) -> ApiResult<Json<Vec<PlacementResponse>>> {
    let placements = PlacementService::active_placements(&db).await?;
    Ok(Json(placements.into_iter().map(to_response).collect()))
}

/// Get a specific placement by ID
#[utoipa::path(
    get,
    path = "/placements/{id}",
    params(("id" = Uuid, Path, description = "Placement ID")),
    responses(
        (status = 200, description = "Placement found", body = PlacementResponse),
        (status = 404, description = "Placement not found")
    ),
    tag = "Placements"
)]
pub async fn get_placement_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PlacementResponse>> {
    let placement = PlacementService::get_placement(&db, id).await?;
    Ok(Json(to_response(placement)))
}

/// Close a placement; every move out of PLACED is terminal
#[utoipa::path(
    put,
    path = "/placements/{id}/status",
    params(("id" = Uuid, Path, description = "Placement ID")),
    request_body = ClosePlacementRequest,
    responses(
        (status = 200, description = "Status updated", body = PlacementResponse),
        (status = 404, description = "Placement not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "Placements"
)]
pub async fn update_placement_status(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<ClosePlacementRequest>,
) -> ApiResult<Json<PlacementResponse>> {
    let status = parse_status(&request.status)?;
    let placement = PlacementService::update_status(&db, id, status, request.end_date).await?;
    Ok(Json(to_response(placement)))
}

/// Delete a placement record
#[utoipa::path(
    delete,
    path = "/placements/{id}",
    params(("id" = Uuid, Path, description = "Placement ID")),
    responses(
        (status = 204, description = "Placement deleted"),
        (status = 404, description = "Placement not found")
    ),
    tag = "Placements"
)]
pub async fn delete_placement(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    PlacementService::delete_placement(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Helper function to convert database models to API responses
fn to_response(placement: placement::Model) -> PlacementResponse {
    let today = Utc::now().date_naive();

    PlacementResponse {
        id: placement.id.to_string(),
        student_id: placement.student_id.to_string(),
        company_id: placement.company_id.to_string(),
        is_active: placement.is_active(today),
        is_in_probation: placement.is_in_probation(today),
        position: placement.position,
        salary: placement.salary,
        placement_date: placement.placement_date,
        status: placement.status.to_string(),
        probation_period_months: placement.probation_period_months,
        joining_date: placement.joining_date,
        end_date: placement.end_date,
        notes: placement.notes,
    }
}
