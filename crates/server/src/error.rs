use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use serde_json::json;
use std::str::FromStr;

/// Wraps service failures so handlers can use `?` and keep the error
/// taxonomy visible at the HTTP boundary
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ServiceError::CapacityExceeded(_)
            | ServiceError::Conflict(_)
            | ServiceError::State(_) => (StatusCode::CONFLICT, self.0.to_string()),
            ServiceError::Db(err) => {
                log::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Parses a status string from a request body into its enum, mapping bad
/// input to a validation failure
pub fn parse_status<T: FromStr<Err = String>>(value: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|err: String| ApiError::from(ServiceError::Validation(err)))
}
