//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use deviceapi_app::ports::{AuditPublisher, Store, TokenSigner};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the record API at the root next to `/health`. Requests pass the
/// `cors` policy and a [`TraceLayer`] that logs each request/response at the
/// `DEBUG` level.
pub fn build<S, A, K>(state: AppState<S, A, K>, cors: CorsLayer) -> Router
where
    S: Store,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
