use crate::dtos::common::PaginationMeta;
use crate::dtos::student::{
    AssignBatchRequest, CreateStudentRequest, GraduateRequest, PaginatedStudentsResponse,
    StatusHistoryResponse, StudentQueryParams, StudentResponse, UpdateStudentRequest,
    UpdateStudentStatusRequest,
};
use crate::error::{ApiResult, parse_status};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::{
    entities::student,
    services::student::{CreateStudent, StudentFilters, StudentService, UpdateStudent},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Register a new student, optionally claiming a batch slot
#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate contact details or batch full")
    ),
    tag = "Students"
)]
pub async fn create_student(
    State(db): State<DatabaseConnection>,
    Json(request): Json<CreateStudentRequest>,
) -> ApiResult<(StatusCode, Json<StudentResponse>)> {
    let student = StudentService::create_student(
        &db,
        CreateStudent {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            date_of_birth: request.date_of_birth,
            address: request.address,
            enrollment_date: request.enrollment_date,
            batch_id: request.batch_id,
            lead_id: None,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(student))))
}

/// Get paginated list of students
#[utoipa::path(
    get,
    path = "/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "List of students", body = PaginatedStudentsResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Students"
)]
pub async fn get_students(
    State(db): State<DatabaseConnection>,
    Query(params): Query<StudentQueryParams>,
) -> ApiResult<Json<PaginatedStudentsResponse>> {
    let status = params.status.as_deref().map(parse_status).transpose()?;

    let filters = StudentFilters {
        status,
        batch_id: params.batch_id,
        unassigned: params.unassigned,
        search: params.search,
    };

    let (students, total_items) =
        StudentService::list_students(&db, filters, params.page, params.per_page).await?;

    Ok(Json(PaginatedStudentsResponse {
        students: students.into_iter().map(to_response).collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Get a specific student by ID
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_student_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StudentResponse>> {
    let student = StudentService::get_student(&db, id).await?;
    Ok(Json(to_response(student)))
}

/// Update a student's contact details
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Duplicate contact details")
    ),
    tag = "Students"
)]
pub async fn update_student(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStudentRequest>,
) -> ApiResult<Json<StudentResponse>> {
    let student = StudentService::update_student(
        &db,
        id,
        UpdateStudent {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            date_of_birth: request.date_of_birth,
            address: request.address,
        },
    )
    .await?;

    Ok(Json(to_response(student)))
}

/// Assign the student to a batch, moving the enrollment ledgers
#[utoipa::path(
    put,
    path = "/students/{id}/batch",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = AssignBatchRequest,
    responses(
        (status = 200, description = "Student assigned", body = StudentResponse),
        (status = 404, description = "Student or batch not found"),
        (status = 409, description = "Target batch is full")
    ),
    tag = "Students"
)]
pub async fn assign_to_batch(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignBatchRequest>,
) -> ApiResult<Json<StudentResponse>> {
    let student = StudentService::assign_to_batch(&db, id, request.batch_id).await?;
    Ok(Json(to_response(student)))
}

/// Remove the student from their batch, releasing the slot
#[utoipa::path(
    delete,
    path = "/students/{id}/batch",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student unassigned", body = StudentResponse),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn remove_from_batch(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StudentResponse>> {
    let student = StudentService::remove_from_batch(&db, id).await?;
    Ok(Json(to_response(student)))
}

/// Checked status change; graduation has its own endpoint
#[utoipa::path(
    put,
    path = "/students/{id}/status",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = StudentResponse),
        (status = 400, description = "Unknown status or graduation attempted here"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "Students"
)]
pub async fn update_student_status(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStudentStatusRequest>,
) -> ApiResult<Json<StudentResponse>> {
    let status = parse_status(&request.status)?;
    let student = StudentService::update_status(&db, id, status, request.notes).await?;
    Ok(Json(to_response(student)))
}

/// Graduate an active student with a final grade
#[utoipa::path(
    post,
    path = "/students/{id}/graduate",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = GraduateRequest,
    responses(
        (status = 200, description = "Student graduated", body = StudentResponse),
        (status = 400, description = "Missing final grade"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Student is not active")
    ),
    tag = "Students"
)]
pub async fn graduate_student(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<GraduateRequest>,
) -> ApiResult<Json<StudentResponse>> {
    let student = StudentService::graduate(&db, id, request.final_grade).await?;
    Ok(Json(to_response(student)))
}

/// The student's status change log, oldest first
#[utoipa::path(
    get,
    path = "/students/{id}/history",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Status history", body = [StatusHistoryResponse]),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_status_history(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<StatusHistoryResponse>>> {
    let history = StudentService::status_history(&db, id).await?;

    Ok(Json(
        history
            .into_iter()
            .map(|entry| StatusHistoryResponse {
                status: entry.status.to_string(),
                change_date: entry.change_date,
                notes: entry.notes,
            })
            .collect(),
    ))
}

/// Delete a student, releasing any held batch slot
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    StudentService::delete_student(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Helper function to convert database models to API responses
fn to_response(student: student::Model) -> StudentResponse {
    StudentResponse {
        id: student.id.to_string(),
        enrollment_number: student.enrollment_number,
        first_name: student.first_name,
        last_name: student.last_name,
        email: student.email,
        phone: student.phone,
        date_of_birth: student.date_of_birth,
        address: student.address,
        batch_id: student.batch_id.map(|id| id.to_string()),
        status: student.status.to_string(),
        enrollment_date: student.enrollment_date,
        lead_id: student.lead_id.map(|id| id.to_string()),
        graduation_date: student.graduation_date,
        final_grade: student.final_grade,
    }
}
