use crate::dtos::common::{PaginationMeta, UpdateStatusRequest};
use crate::dtos::lead::{
    AddFollowUpRequest, ConvertLeadRequest, CreateLeadRequest, FollowUpResponse, LeadQueryParams,
    LeadResponse, PaginatedLeadsResponse, UpdateLeadRequest,
};
use crate::dtos::student::StudentResponse;
use crate::error::{ApiResult, parse_status};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use database::{
    entities::lead,
    services::lead::{ConvertLead, CreateLead, LeadFilters, LeadService, UpdateLead},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Register a new lead
#[utoipa::path(
    post,
    path = "/leads",
    request_body = CreateLeadRequest,
    responses(
        (status = 201, description = "Lead created", body = LeadResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Lead email already registered")
    ),
    tag = "Leads"
)]
pub async fn create_lead(
    State(db): State<DatabaseConnection>,
    Json(request): Json<CreateLeadRequest>,
) -> ApiResult<(StatusCode, Json<LeadResponse>)> {
    let lead = LeadService::create_lead(
        &db,
        CreateLead {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            course_interest: request.course_interest,
            source: request.source,
            assigned_counsellor_id: request.assigned_counsellor_id,
            notes: request.notes,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(lead))))
}

/// Get paginated list of leads
#[utoipa::path(
    get,
    path = "/leads",
    params(LeadQueryParams),
    responses(
        (status = 200, description = "List of leads", body = PaginatedLeadsResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Leads"
)]
pub async fn get_leads(
    State(db): State<DatabaseConnection>,
    Query(params): Query<LeadQueryParams>,
) -> ApiResult<Json<PaginatedLeadsResponse>> {
    let status = params.status.as_deref().map(parse_status).transpose()?;

    let filters = LeadFilters {
        status,
        source: params.source,
        counsellor_id: params.counsellor_id,
        search: params.search,
    };

    let (leads, total_items) =
        LeadService::list_leads(&db, filters, params.page, params.per_page).await?;

    Ok(Json(PaginatedLeadsResponse {
        leads: leads.into_iter().map(to_response).collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Leads whose next follow-up is due
#[utoipa::path(
    get,
    path = "/leads/due-follow-ups",
    responses(
        (status = 200, description = "Leads requiring follow-up", body = [LeadResponse])
    ),
    tag = "Leads"
)]
pub async fn get_due_follow_ups(
    State(db): State<DatabaseConnection>,
) -> ApiResult<Json<Vec<LeadResponse>>> {
    let leads = LeadService::leads_requiring_follow_up(&db, Utc::now().naive_utc()).await?;
    Ok(Json(leads.into_iter().map(to_response).collect()))
}

/// Get a specific lead by ID
#[utoipa::path(
    get,
    path = "/leads/{id}",
    params(("id" = Uuid, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead found", body = LeadResponse),
        (status = 404, description = "Lead not found")
    ),
    tag = "Leads"
)]
pub async fn get_lead_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<LeadResponse>> {
    let lead = LeadService::get_lead(&db, id).await?;
    Ok(Json(to_response(lead)))
}

/// Update lead details; converted leads are immutable
#[utoipa::path(
    put,
    path = "/leads/{id}",
    params(("id" = Uuid, Path, description = "Lead ID")),
    request_body = UpdateLeadRequest,
    responses(
        (status = 200, description = "Lead updated", body = LeadResponse),
        (status = 404, description = "Lead not found"),
        (status = 409, description = "Lead is already converted")
    ),
    tag = "Leads"
)]
pub async fn update_lead(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadRequest>,
) -> ApiResult<Json<LeadResponse>> {
    let lead = LeadService::update_lead(
        &db,
        id,
        UpdateLead {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            course_interest: request.course_interest,
            source: request.source,
            assigned_counsellor_id: request.assigned_counsellor_id,
            notes: request.notes,
        },
    )
    .await?;

    Ok(Json(to_response(lead)))
}

/// Move the lead through its pipeline; CONVERTED only via conversion
#[utoipa::path(
    put,
    path = "/leads/{id}/status",
    params(("id" = Uuid, Path, description = "Lead ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = LeadResponse),
        (status = 404, description = "Lead not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "Leads"
)]
pub async fn update_lead_status(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<LeadResponse>> {
    let status = parse_status(&request.status)?;
    let lead = LeadService::update_status(&db, id, status).await?;
    Ok(Json(to_response(lead)))
}

/// Record a follow-up contact with the lead
#[utoipa::path(
    post,
    path = "/leads/{id}/follow-ups",
    params(("id" = Uuid, Path, description = "Lead ID")),
    request_body = AddFollowUpRequest,
    responses(
        (status = 200, description = "Follow-up recorded", body = LeadResponse),
        (status = 404, description = "Lead not found"),
        (status = 409, description = "Lead is already converted")
    ),
    tag = "Leads"
)]
pub async fn add_follow_up(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddFollowUpRequest>,
) -> ApiResult<Json<LeadResponse>> {
    let lead =
        LeadService::add_follow_up(&db, id, request.notes, request.next_follow_up_date).await?;
    Ok(Json(to_response(lead)))
}

/// The lead's follow-up log, oldest first
#[utoipa::path(
    get,
    path = "/leads/{id}/follow-ups",
    params(("id" = Uuid, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Follow-up history", body = [FollowUpResponse]),
        (status = 404, description = "Lead not found")
    ),
    tag = "Leads"
)]
pub async fn get_follow_ups(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<FollowUpResponse>>> {
    let follow_ups = LeadService::follow_ups(&db, id).await?;

    Ok(Json(
        follow_ups
            .into_iter()
            .map(|entry| FollowUpResponse {
                follow_up_date: entry.follow_up_date,
                notes: entry.notes,
                next_action: entry.next_action,
            })
            .collect(),
    ))
}

/// Convert the lead into a student, atomically claiming a batch slot when
/// one is requested
#[utoipa::path(
    post,
    path = "/leads/{id}/convert",
    params(("id" = Uuid, Path, description = "Lead ID")),
    request_body = ConvertLeadRequest,
    responses(
        (status = 201, description = "Lead converted", body = StudentResponse),
        (status = 404, description = "Lead or batch not found"),
        (status = 409, description = "Lead already terminal or batch full")
    ),
    tag = "Leads"
)]
pub async fn convert_lead(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(request): Json<ConvertLeadRequest>,
) -> ApiResult<(StatusCode, Json<StudentResponse>)> {
    let student = LeadService::convert_to_student(
        &db,
        id,
        ConvertLead {
            enrollment_date: request.enrollment_date,
            batch_id: request.batch_id,
            address: request.address,
            date_of_birth: request.date_of_birth,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
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
        }),
    ))
}

/// Delete a lead; converted leads are part of the enrollment record
#[utoipa::path(
    delete,
    path = "/leads/{id}",
    params(("id" = Uuid, Path, description = "Lead ID")),
    responses(
        (status = 204, description = "Lead deleted"),
        (status = 404, description = "Lead not found"),
        (status = 409, description = "Lead is already converted")
    ),
    tag = "Leads"
)]
pub async fn delete_lead(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    LeadService::delete_lead(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Helper function to convert database models to API responses
fn to_response(lead: lead::Model) -> LeadResponse {
    LeadResponse {
        id: lead.id.to_string(),
        first_name: lead.first_name,
        last_name: lead.last_name,
        email: lead.email,
        phone: lead.phone,
        course_interest: lead.course_interest,
        source: lead.source,
        status: lead.status.to_string(),
        assigned_counsellor_id: lead.assigned_counsellor_id.map(|id| id.to_string()),
        converted_date: lead.converted_date,
        notes: lead.notes,
        next_follow_up_date: lead.next_follow_up_date,
    }
}
