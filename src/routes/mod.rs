//! Router assembly: country routes under `/api`, common routes at the root.

mod common;
mod country;

pub use common::common_routes_with_ready;
pub use country::country_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application: `/api/countries/...`, `/health`, `/ready`, `/version`,
/// with request tracing, a body size limit and permissive CORS.
///
/// Each `layer` call re-boxes the routes, so CORS (outermost) sees a plain
/// axum body rather than the limit layer's response body.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api", country_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
}
