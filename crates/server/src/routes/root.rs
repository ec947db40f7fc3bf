use axum::Json;
use serde_json::{Value, json};

/// Service identification for the API root
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information")
    ),
    tag = ""
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "institute-management-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
