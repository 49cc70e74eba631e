//! Tower layers applied to every route.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Allow any origin, method and header; browsers talk to the API from a
/// separately served front end.
pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Emit a tracing span per request and log responses.
pub fn trace() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}
