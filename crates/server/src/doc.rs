use crate::routes::{batch, company, course, employee, health, lead, placement, root, student};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        batch::create_batch,
        batch::get_batches,
        batch::get_batch_by_id,
        batch::update_batch,
        batch::update_batch_capacity,
        batch::update_batch_status,
        batch::get_available_slots,
        batch::delete_batch,
        student::create_student,
        student::get_students,
        student::get_student_by_id,
        student::update_student,
        student::assign_to_batch,
        student::remove_from_batch,
        student::update_student_status,
        student::graduate_student,
        student::get_status_history,
        student::delete_student,
        lead::create_lead,
        lead::get_leads,
        lead::get_due_follow_ups,
        lead::get_lead_by_id,
        lead::update_lead,
        lead::update_lead_status,
        lead::add_follow_up,
        lead::get_follow_ups,
        lead::convert_lead,
        lead::delete_lead,
        placement::create_placement,
        placement::get_placements,
        placement::get_active_placements,
        placement::get_placement_by_id,
        placement::update_placement_status,
        placement::delete_placement,
        course::create_course,
        course::get_courses,
        course::get_course_by_id,
        course::update_course,
        course::delete_course,
        employee::create_employee,
        employee::get_employees,
        employee::get_employee_by_id,
        employee::delete_employee,
        company::create_company,
        company::get_companies,
        company::get_company_by_id,
        company::delete_company
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Batches", description = "Batch scheduling and the enrollment ledger"),
        (name = "Students", description = "Student records and status transitions"),
        (name = "Leads", description = "Lead pipeline and conversion"),
        (name = "Placements", description = "Placement outcomes"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Employees", description = "Instructors and counsellors"),
        (name = "Companies", description = "Placement partner companies"),
        (name = "Health", description = "Liveness endpoints"),
    ),
    info(
        title = "Institute Management API",
        version = "1.0.0",
        description = "Institute management back end: batches, students, leads and placements",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
