pub mod records;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::SharedState;

/// Versioned media type every webhook exchange is framed with. Requests with
/// any other marker are rejected before reaching the core.
pub const WEBHOOK_MEDIA_TYPE: &str = "application/external.dns.webhook+json;version=1";

pub fn create_router(state: SharedState) -> Router {
    use crate::api::records;

    Router::new()
        .route("/", get(records::negotiate))
        .route("/healthz", get(records::healthz))
        .route(
            "/records",
            get(records::list_records).post(records::apply_changes),
        )
        .route("/adjustendpoints", post(records::adjust_endpoints))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
