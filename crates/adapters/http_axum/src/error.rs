//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use deviceapi_domain::error::{DeviceApiError, FieldViolation};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldViolation>>,
}

/// Everything a handler can fail with.
pub enum ApiError {
    /// A domain failure from a service.
    Domain(DeviceApiError),
    /// The request body was not the expected JSON.
    Payload(JsonRejection),
    /// A path segment did not parse (e.g. a non-numeric id).
    Path(PathRejection),
    /// Login refused; the cause is not disclosed.
    BadCredentials,
}

impl From<DeviceApiError> for ApiError {
    fn from(err: DeviceApiError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Payload(rejection)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Path(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Domain(DeviceApiError::Validation(err)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: err.to_string(),
                    fields: Some(err.violations().to_vec()),
                },
            ),
            Self::Domain(DeviceApiError::NotFound(err)) => {
                (StatusCode::NOT_FOUND, message(err.to_string()))
            }
            Self::Domain(DeviceApiError::Storage(err)) => {
                tracing::warn!(error = %err, "storage rejected request");
                (StatusCode::BAD_REQUEST, message(err.to_string()))
            }
            Self::Domain(err @ (DeviceApiError::Publish(_) | DeviceApiError::Token(_))) => {
                tracing::error!(error = %err, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message("internal server error".to_string()),
                )
            }
            Self::Payload(rejection) => (StatusCode::BAD_REQUEST, message(rejection.body_text())),
            Self::Path(rejection) => (rejection.status(), message(rejection.body_text())),
            Self::BadCredentials => (
                StatusCode::BAD_REQUEST,
                message("user not found or wrong password".to_string()),
            ),
        };

        (status, Json(body)).into_response()
    }
}

fn message(error: String) -> ErrorBody {
    ErrorBody {
        error,
        fields: None,
    }
}
