use crate::dtos::common::PaginationMeta;
use crate::dtos::course::{
    CourseQueryParams, CourseResponse, CreateCourseRequest, PaginatedCoursesResponse,
    UpdateCourseRequest,
};
use crate::error::ApiResult;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::{entities::course, services::course::CourseService};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Create a new course
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Course name already in use")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(db): State<DatabaseConnection>,
    Json(request): Json<CreateCourseRequest>,
) -> ApiResult<(StatusCode, Json<CourseResponse>)> {
    let course = CourseService::create_course(
        &db,
        request.name,
        request.description,
        request.duration_months,
        request.fees,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(course))))
}

/// Get paginated list of courses
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses", body = PaginatedCoursesResponse)
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(db): State<DatabaseConnection>,
    Query(params): Query<CourseQueryParams>,
) -> ApiResult<Json<PaginatedCoursesResponse>> {
    let (courses, total_items) =
        CourseService::list_courses(&db, params.search, params.page, params.per_page).await?;

    Ok(Json(PaginatedCoursesResponse {
        courses: courses.into_iter().map(to_response).collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Get a specific course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CourseResponse>> {
    let course = CourseService::get_course(&db, id).await?;
    Ok(Json(to_response(course)))
}

/// Update course description or fees
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCourseRequest>,
) -> ApiResult<Json<CourseResponse>> {
    let course = CourseService::update_course(&db, id, request.description, request.fees).await?;
    Ok(Json(to_response(course)))
}

/// Delete a course; refused while batches reference it
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course still has batches")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    CourseService::delete_course(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Helper function to convert database models to API responses
fn to_response(course: course::Model) -> CourseResponse {
    CourseResponse {
        id: course.id.to_string(),
        name: course.name,
        description: course.description,
        duration_months: course.duration_months,
        fees: course.fees,
    }
}
