//! JSON REST handlers shared by every record type.
//!
//! Each handler is generic over the record; [`Resource`] picks the matching
//! service out of the shared state.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use deviceapi_app::ports::{AuditPublisher, OwnedRepository, Repository, TokenSigner};
use deviceapi_app::services::RecordService;
use deviceapi_domain::actuator::Actuator;
use deviceapi_domain::device::Device;
use deviceapi_domain::error::{DeviceApiError, NotFoundError};
use deviceapi_domain::gateway::Gateway;
use deviceapi_domain::id::RecordId;
use deviceapi_domain::measurement::Measurement;
use deviceapi_domain::person::Person;
use deviceapi_domain::record::{Owned, Record};
use deviceapi_domain::sensor::Sensor;

use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};
use crate::state::AppState;

/// A record exposed under its own path.
pub trait Resource: Record {
    /// The service handling this record.
    fn service<S, A, K>(state: &AppState<S, A, K>) -> &RecordService<Self, S, A>;
}

macro_rules! resource {
    ($record:ty => $field:ident) => {
        impl Resource for $record {
            fn service<S, A, K>(state: &AppState<S, A, K>) -> &RecordService<Self, S, A> {
                &state.$field
            }
        }
    };
}

resource!(Person => people);
resource!(Gateway => gateways);
resource!(Device => devices);
resource!(Actuator => actuators);
resource!(Sensor => sensors);
resource!(Measurement => measurements);

/// Possible responses from the get endpoint.
pub enum GetResponse<T> {
    Ok(Json<T>),
    NotFound,
}

impl<T: Serialize> IntoResponse for GetResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse<T> {
    Created(Json<T>),
}

impl<T: Serialize> IntoResponse for CreateResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => StatusCode::OK.into_response(),
        }
    }
}

/// `GET /<resource>`
pub async fn list<T, S, A, K>(
    State(state): State<AppState<S, A, K>>,
) -> Result<Json<Vec<T>>, ApiError>
where
    T: Resource,
    S: Repository<T> + 'static,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    let records = T::service(&state).get_all().await?;
    Ok(Json(records))
}

/// `GET /<resource>/{id}`
pub async fn get<T, S, A, K>(
    State(state): State<AppState<S, A, K>>,
    IdPath(id): IdPath<i64>,
) -> Result<GetResponse<T>, ApiError>
where
    T: Resource,
    S: Repository<T> + 'static,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    let found = T::service(&state).get_by_id(T::Id::from_raw(id)).await?;
    Ok(found.map_or(GetResponse::NotFound, |record| GetResponse::Ok(Json(record))))
}

/// `POST /<resource>`
pub async fn create<T, S, A, K>(
    State(state): State<AppState<S, A, K>>,
    JsonBody(input): JsonBody<T::Input>,
) -> Result<CreateResponse<T>, ApiError>
where
    T: Resource,
    S: Repository<T> + 'static,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    let created = T::service(&state).create(input).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /<resource>/{id}`
pub async fn update<T, S, A, K>(
    State(state): State<AppState<S, A, K>>,
    IdPath(id): IdPath<i64>,
    JsonBody(input): JsonBody<T::Input>,
) -> Result<Json<T>, ApiError>
where
    T: Resource,
    S: Repository<T> + 'static,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    let updated = T::service(&state)
        .update(T::Id::from_raw(id), input)
        .await?;
    Ok(Json(updated))
}

/// `DELETE /<resource>/{id}`
pub async fn delete<T, S, A, K>(
    State(state): State<AppState<S, A, K>>,
    IdPath(id): IdPath<i64>,
) -> Result<DeleteResponse, ApiError>
where
    T: Resource,
    S: Repository<T> + 'static,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    T::service(&state).delete(T::Id::from_raw(id)).await?;
    Ok(DeleteResponse::Ok)
}

/// `GET /<parent>/{id}/<children>`
pub async fn children<P, C, S, A, K>(
    State(state): State<AppState<S, A, K>>,
    IdPath(id): IdPath<i64>,
) -> Result<Json<Vec<C>>, ApiError>
where
    P: Resource,
    C: Owned<Owner = P>,
    S: Repository<P> + OwnedRepository<C> + 'static,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    let parent = P::Id::from_raw(id);
    let found = P::service(&state).list_children::<C>(parent).await?;
    let children = found.ok_or_else(|| {
        DeviceApiError::from(NotFoundError {
            entity: P::KIND.name(),
            id: parent.to_string(),
        })
    })?;
    Ok(Json(children))
}
