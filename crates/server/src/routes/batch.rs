use crate::dtos::batch::{
    AvailableSlotsResponse, BatchQueryParams, BatchResponse, CreateBatchRequest,
    PaginatedBatchesResponse, UpdateBatchRequest, UpdateCapacityRequest,
};
use crate::dtos::common::{PaginationMeta, UpdateStatusRequest};
use crate::error::{ApiResult, parse_status};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::{
    entities::batch,
    services::batch::{BatchFilters, BatchService},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Create a new batch
#[utoipa::path(
    post,
    path = "/batches",
    request_body = CreateBatchRequest,
    responses(
        (status = 201, description = "Batch created", body = BatchResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Course or instructor not found"),
        (status = 409, description = "Batch name already in use")
    ),
    tag = "Batches"
)]
pub async fn create_batch(
    State(db): State<DatabaseConnection>,
    Json(request): Json<CreateBatchRequest>,
) -> ApiResult<(StatusCode, Json<BatchResponse>)> {
    let batch = BatchService::create_batch(
        &db,
        request.name,
        request.course_id,
        request.start_date,
        request.capacity,
        request.instructor_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(batch))))
}

/// Get paginated list of batches
#[utoipa::path(
    get,
    path = "/batches",
    params(BatchQueryParams),
    responses(
        (status = 200, description = "List of batches", body = PaginatedBatchesResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Batches"
)]
pub async fn get_batches(
    State(db): State<DatabaseConnection>,
    Query(params): Query<BatchQueryParams>,
) -> ApiResult<Json<PaginatedBatchesResponse>> {
    let status = params.status.as_deref().map(parse_status).transpose()?;

    let filters = BatchFilters {
        status,
        course_id: params.course_id,
        instructor_id: params.instructor_id,
        has_available_slots: params.has_available_slots,
        search: params.search,
    };

    let (batches, total_items) =
        BatchService::list_batches(&db, filters, params.page, params.per_page).await?;

    Ok(Json(PaginatedBatchesResponse {
        batches: batches.into_iter().map(to_response).collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Get a specific batch by ID
#[utoipa::path(
    get,
    path = "/batches/{id}",
    params(("id" = Uuid, Path, description = "Batch ID")),
    responses(
        (status = 200, description = "Batch found", body = BatchResponse),
        (status = 404, description = "Batch not found")
    ),
    tag = "Batches"
)]
pub async fn get_batch_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BatchResponse>> {
    let batch = BatchService::get_batch(&db, id).await?;
    Ok(Json(to_response(batch)))
}

/// Update batch details (capacity and status have dedicated endpoints)
#[utoipa::path(
    put,
    path = "/batches/{id}",
    params(("id" = Uuid, Path, description = "Batch ID")),
    request_body = UpdateBatchRequest,
    responses(
        (status = 200, description = "Batch updated", body = BatchResponse),
        (status = 404, description = "Batch not found")
    ),
    tag = "Batches"
)]
pub async fn update_batch(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBatchRequest>,
) -> ApiResult<Json<BatchResponse>> {
    let batch = BatchService::update_batch(
        &db,
        id,
        request.name,
        request.start_date,
        request.instructor_id,
    )
    .await?;

    Ok(Json(to_response(batch)))
}

/// Revise batch capacity; refused below the current enrollment
#[utoipa::path(
    put,
    path = "/batches/{id}/capacity",
    params(("id" = Uuid, Path, description = "Batch ID")),
    request_body = UpdateCapacityRequest,
    responses(
        (status = 200, description = "Capacity updated", body = BatchResponse),
        (status = 404, description = "Batch not found"),
        (status = 409, description = "Capacity below current enrollment")
    ),
    tag = "Batches"
)]
pub async fn update_batch_capacity(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCapacityRequest>,
) -> ApiResult<Json<BatchResponse>> {
    let batch = BatchService::update_capacity(&db, id, request.capacity).await?;
    Ok(Json(to_response(batch)))
}

/// Move the batch through its lifecycle
#[utoipa::path(
    put,
    path = "/batches/{id}/status",
    params(("id" = Uuid, Path, description = "Batch ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = BatchResponse),
        (status = 404, description = "Batch not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "Batches"
)]
pub async fn update_batch_status(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<BatchResponse>> {
    let status = parse_status(&request.status)?;
    let batch = BatchService::update_status(&db, id, status).await?;
    Ok(Json(to_response(batch)))
}

/// Remaining capacity of a batch
#[utoipa::path(
    get,
    path = "/batches/{id}/available-slots",
    params(("id" = Uuid, Path, description = "Batch ID")),
    responses(
        (status = 200, description = "Slot availability", body = AvailableSlotsResponse),
        (status = 404, description = "Batch not found")
    ),
    tag = "Batches"
)]
pub async fn get_available_slots(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AvailableSlotsResponse>> {
    let batch = BatchService::get_batch(&db, id).await?;

    Ok(Json(AvailableSlotsResponse {
        batch_id: batch.id.to_string(),
        available_slots: batch.available_slots(),
        has_available_slots: batch.has_available_slots(),
    }))
}

/// Delete a batch; refused while students are enrolled
#[utoipa::path(
    delete,
    path = "/batches/{id}",
    params(("id" = Uuid, Path, description = "Batch ID")),
    responses(
        (status = 204, description = "Batch deleted"),
        (status = 404, description = "Batch not found"),
        (status = 409, description = "Batch still has enrolled students")
    ),
    tag = "Batches"
)]
pub async fn delete_batch(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    BatchService::delete_batch(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Helper function to convert database models to API responses
fn to_response(batch: batch::Model) -> BatchResponse {
    BatchResponse {
        id: batch.id.to_string(),
        available_slots: batch.available_slots(),
        utilization_percentage: batch.utilization_percentage(),
        name: batch.name,
        course_id: batch.course_id.to_string(),
        start_date: batch.start_date,
        end_date: batch.end_date,
        capacity: batch.capacity,
        current_enrollment: batch.current_enrollment,
        status: batch.status.to_string(),
        instructor_id: batch.instructor_id.map(|id| id.to_string()),
    }
}
