//! HTTP routes of the public site
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /health | GET | liveness |
//! | /api/menu | GET | menu grouped by category |
//! | /api/chefs | GET | chef bios |
//! | /api/reservations | POST | booking request |

pub mod chefs;
pub mod health;
pub mod menu;
pub mod reservations;

use axum::Router;
use axum::routing::{get, post};
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

/// Request id generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, no middleware
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/menu", get(menu::list))
        .route("/api/chefs", get(chefs::list))
        .route("/api/reservations", post(reservations::create))
}

/// Routes with middleware and state, ready to serve
pub fn build_app(state: AppState) -> Router {
    build_router()
        .with_state(state)
        // The site frontend is served from another origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
}
