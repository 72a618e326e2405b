use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::post;
use axum::Router;
use governor::DefaultDirectRateLimiter;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::sign_up::sign_up;
use super::middleware::rate_limit;
use crate::domain::user::ports::TokenServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    /// Reserved for the login flow; signup never issues tokens.
    pub token_service: Arc<dyn TokenServicePort>,
    pub rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
    pub expose_error_details: bool,
}

pub fn create_router(state: AppState) -> Router {
    let mut api_routes = Router::new().route("/api/auth/sign-up", post(sign_up));

    if let Some(limiter) = state.rate_limiter.clone() {
        api_routes = api_routes.route_layer(middleware::from_fn_with_state(limiter, rate_limit));
    }

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(api_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
