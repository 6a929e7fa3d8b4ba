//! Login handler.

use axum::Json;
use axum::extract::State;

use deviceapi_app::ports::{AuditPublisher, PersonDirectory, TokenSigner};
use deviceapi_domain::auth::{Credentials, Session};
use deviceapi_domain::error::DeviceApiError;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// `POST /auth`
///
/// Unknown users and wrong passwords share one answer.
pub async fn login<S, A, K>(
    State(state): State<AppState<S, A, K>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<Session>, ApiError>
where
    S: PersonDirectory + 'static,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    match state.auth.authenticate(credentials).await {
        Ok(session) => Ok(Json(session)),
        Err(DeviceApiError::NotFound(_)) => Err(ApiError::BadCredentials),
        Err(err) => Err(err.into()),
    }
}
