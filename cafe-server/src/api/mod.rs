//! HTTP API
//!
//! | Path | Methods | Auth |
//! |------|---------|------|
//! | /health | GET | - |
//! | /api/orders | GET, POST | - |
//! | /api/orders/{id} | GET, PUT, DELETE | - |
//! | /api/orders/{id}/staff | PUT | worker session |
//! | /api/revenue | GET | - |
//! | /api/auth/login | POST | - |
//! | /api/auth/logout | POST | worker session |
//! | /api/auth/me | GET | worker session |

pub mod auth;
pub mod health;
pub mod json;
pub mod orders;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(auth::router())
}

/// Fully configured application; used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}
