use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::RETRY_AFTER, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest caller-supplied request ID that is echoed back as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation ID for one HTTP request, stored as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuses the caller's `x-request-id` when it is short printable ASCII,
    /// otherwise mints a `UUIDv4`.
    fn from_headers(headers: &HeaderMap) -> Self {
        let supplied = headers
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| {
                !v.is_empty()
                    && v.len() <= MAX_REQUEST_ID_LEN
                    && v.bytes().all(|b| b.is_ascii_graphic())
            });
        Self(supplied.map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned))
    }
}

/// Tags the request with a [`RequestId`] and echoes it in the response
/// `x-request-id` header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = RequestId::from_headers(req.headers());
    let header = HeaderValue::from_str(&id.0).ok();
    req.extensions_mut().insert(id);

    let mut res = next.run(req).await;
    if let Some(value) = header {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

#[derive(Debug)]
struct FixedWindow {
    max_requests: usize,
    window: Duration,
    opened_at: Instant,
    admitted: usize,
}

impl FixedWindow {
    /// Admits one request at `now`, or returns how long until the window
    /// reopens.
    fn admit(&mut self, now: Instant) -> Result<(), Duration> {
        let elapsed = now.saturating_duration_since(self.opened_at);
        if elapsed >= self.window {
            self.opened_at = now;
            self.admitted = 0;
        }

        if self.admitted >= self.max_requests {
            return Err(self.window.saturating_sub(elapsed));
        }
        self.admitted += 1;
        Ok(())
    }
}

/// Pitch runs allowed per window, shared by every clone.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    window: Arc<Mutex<FixedWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            window: Arc::new(Mutex::new(FixedWindow {
                max_requests,
                window,
                opened_at: Instant::now(),
                admitted: 0,
            })),
        }
    }
}

/// Rejects requests over the limit with a `rate_limited` error and a
/// `retry-after` header in whole seconds.
pub async fn enforce_rate_limit(
    State(limiter): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let admitted = limiter.window.lock().await.admit(Instant::now());
    let Err(retry_after) = admitted else {
        return next.run(req).await;
    };

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let retry_secs = retry_after.as_secs().max(1);
    tracing::warn!(request_id = %request_id, retry_secs, "pitch rate limit exceeded");

    let mut res = ApiError::new(request_id, "rate_limited", "rate limit exceeded").into_response();
    res.headers_mut().insert(RETRY_AFTER, HeaderValue::from(retry_secs));
    res
}
