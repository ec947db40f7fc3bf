use crate::dtos::common::PaginationMeta;
use crate::dtos::employee::{
    CreateEmployeeRequest, EmployeeQueryParams, EmployeeResponse, PaginatedEmployeesResponse,
};
use crate::error::ApiResult;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::{
    entities::employee,
    services::employee::{CreateEmployee, EmployeeService},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Register a new employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Employee code or email already in use")
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(db): State<DatabaseConnection>,
    Json(request): Json<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let employee = EmployeeService::create_employee(
        &db,
        CreateEmployee {
            employee_code: request.employee_code,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            department: request.department,
            role: request.role,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(employee))))
}

/// Get paginated list of employees
#[utoipa::path(
    get,
    path = "/employees",
    params(EmployeeQueryParams),
    responses(
        (status = 200, description = "List of employees", body = PaginatedEmployeesResponse)
    ),
    tag = "Employees"
)]
pub async fn get_employees(
    State(db): State<DatabaseConnection>,
    Query(params): Query<EmployeeQueryParams>,
) -> ApiResult<Json<PaginatedEmployeesResponse>> {
    let (employees, total_items) =
        EmployeeService::list_employees(&db, params.department, params.page, params.per_page)
            .await?;

    Ok(Json(PaginatedEmployeesResponse {
        employees: employees.into_iter().map(to_response).collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Get a specific employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn get_employee_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee = EmployeeService::get_employee(&db, id).await?;
    Ok(Json(to_response(employee)))
}

/// Delete an employee with no batches or leads assigned
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee still has assignments")
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    EmployeeService::delete_employee(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Helper function to convert database models to API responses
fn to_response(employee: employee::Model) -> EmployeeResponse {
    EmployeeResponse {
        id: employee.id.to_string(),
        employee_code: employee.employee_code,
        first_name: employee.first_name,
        last_name: employee.last_name,
        email: employee.email,
        phone: employee.phone,
        department: employee.department,
        role: employee.role,
    }
}
