mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

use axum::{
    Router,
    routing::{get, post, put},
};
use database::db::create_connection;
use log::{info, warn};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn api_router() -> Router<DatabaseConnection> {
    Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route(
            "/batches",
            post(routes::batch::create_batch).get(routes::batch::get_batches),
        )
        .route(
            "/batches/{id}",
            get(routes::batch::get_batch_by_id)
                .put(routes::batch::update_batch)
                .delete(routes::batch::delete_batch),
        )
        .route("/batches/{id}/capacity", put(routes::batch::update_batch_capacity))
        .route("/batches/{id}/status", put(routes::batch::update_batch_status))
        .route(
            "/batches/{id}/available-slots",
            get(routes::batch::get_available_slots),
        )
        .route(
            "/students",
            post(routes::student::create_student).get(routes::student::get_students),
        )
        .route(
            "/students/{id}",
            get(routes::student::get_student_by_id)
                .put(routes::student::update_student)
                .delete(routes::student::delete_student),
        )
        .route(
            "/students/{id}/batch",
            put(routes::student::assign_to_batch).delete(routes::student::remove_from_batch),
        )
        .route(
            "/students/{id}/status",
            put(routes::student::update_student_status),
        )
        .route("/students/{id}/graduate", post(routes::student::graduate_student))
        .route("/students/{id}/history", get(routes::student::get_status_history))
        .route(
            "/leads",
            post(routes::lead::create_lead).get(routes::lead::get_leads),
        )
        .route("/leads/due-follow-ups", get(routes::lead::get_due_follow_ups))
        .route(
            "/leads/{id}",
            get(routes::lead::get_lead_by_id)
                .put(routes::lead::update_lead)
                .delete(routes::lead::delete_lead),
        )
        .route("/leads/{id}/status", put(routes::lead::update_lead_status))
        .route(
            "/leads/{id}/follow-ups",
            post(routes::lead::add_follow_up).get(routes::lead::get_follow_ups),
        )
        .route("/leads/{id}/convert", post(routes::lead::convert_lead))
        .route(
            "/placements",
            post(routes::placement::create_placement).get(routes::placement::get_placements),
        )
        .route(
            "/placements/active",
            get(routes::placement::get_active_placements),
        )
        .route(
            "/placements/{id}",
            get(routes::placement::get_placement_by_id)
                .delete(routes::placement::delete_placement),
        )
        .route(
            "/placements/{id}/status",
            put(routes::placement::update_placement_status),
        )
        .route(
            "/courses",
            post(routes::course::create_course).get(routes::course::get_courses),
        )
        .route(
            "/courses/{id}",
            get(routes::course::get_course_by_id)
                .put(routes::course::update_course)
                .delete(routes::course::delete_course),
        )
        .route(
            "/employees",
            post(routes::employee::create_employee).get(routes::employee::get_employees),
        )
        .route(
            "/employees/{id}",
            get(routes::employee::get_employee_by_id).delete(routes::employee::delete_employee),
        )
        .route(
            "/companies",
            post(routes::company::create_company).get(routes::company::get_companies),
        )
        .route(
            "/companies/{id}",
            get(routes::company::get_company_by_id).delete(routes::company::delete_company),
        )
}

#[tokio::main]
async fn main() {
    env_logger::init();
    dotenvy::dotenv().ok();

    let db = create_connection()
        .await
        .expect("failed to connect to the database");

    let api = api_router().with_state(db);

    // Authentication is delegated to the OAuth2 resource-server layer when
    // an issuer is configured
    let api = match std::env::var("OIDC_ISSUER_URL") {
        Ok(issuer_url) => {
            let oauth2_resource_server = <OAuth2ResourceServer>::builder()
                .issuer_url(issuer_url.as_str())
                .build()
                .await
                .expect("Failed to build OAuth2ResourceServer");

            api.layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()))
        }
        Err(_) => {
            warn!("OIDC_ISSUER_URL is not set; serving without authentication");
            api
        }
    };

    let app = api
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::ApiDoc::openapi()))
        .layer(CompressionLayer::new());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("failed to bind listener");
    info!("Running axum on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .expect("server exited with an error");
}
