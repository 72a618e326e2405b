use std::num::NonZeroU32;
use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use governor::clock::Clock as _;
use governor::DefaultDirectRateLimiter;
use governor::Quota;
use governor::RateLimiter;

use super::handlers::ApiError;

/// Build the shared limiter allowing `requests_per_minute` across the API.
///
/// # Returns
/// None when `requests_per_minute` is zero
pub fn rate_limiter(requests_per_minute: u32) -> Option<Arc<DefaultDirectRateLimiter>> {
    NonZeroU32::new(requests_per_minute)
        .map(|rpm| Arc::new(RateLimiter::direct(Quota::per_minute(rpm))))
}

/// Middleware rejecting requests over quota with 429 and `Retry-After`.
pub async fn rate_limit(
    State(limiter): State<Arc<DefaultDirectRateLimiter>>,
    req: Request,
    next: Next,
) -> Response {
    match limiter.check() {
        Ok(()) => next.run(req).await,
        Err(not_until) => {
            let wait = not_until.wait_time_from(limiter.clock().now());
            let retry_after = wait.as_secs().max(1);

            tracing::warn!(
                uri = %req.uri(),
                retry_after_secs = retry_after,
                "Rate limit exceeded"
            );

            let mut response = ApiError::too_many_requests().into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}
