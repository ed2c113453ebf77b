//! Rate limiting middleware
//!
//! Fixed-window counters in Redis, keyed by client IP and endpoint group.
//! Without Redis, or when Redis errors, requests are let through.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::{
    constants::{rate_limits, API_BASE_PATH},
    error::AppError,
    middleware::auth::client_ip,
    state::AppState,
};

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(mut redis) = state.redis() else {
        return Ok(next.run(request).await);
    };

    let ip = rate_limit_ip(
        request.headers(),
        request.extensions().get::<ConnectInfo<SocketAddr>>(),
        state.config().server.trust_proxy_headers,
    );
    let bucket = path_bucket(request.uri().path());
    let (limit, window) = get_rate_limit(bucket, state.config().server.rate_limit_per_minute);
    let key = rate_limit_key(bucket, &ip);

    // The window starts with the first request; SET NX never extends it
    let result: redis::RedisResult<(i64,)> = redis::pipe()
        .atomic()
        .cmd("SET")
        .arg(&key)
        .arg(0)
        .arg("EX")
        .arg(window)
        .arg("NX")
        .ignore()
        .incr(&key, 1)
        .query_async(&mut redis)
        .await;

    let count = match result {
        Ok((count,)) => count,
        Err(e) => {
            tracing::warn!(error = %e, "Rate limiter unavailable, allowing request");
            return Ok(next.run(request).await);
        }
    };

    if count > limit {
        tracing::warn!(ip = %ip, bucket, count, "Rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

/// Client identity used for counting. Forwarded headers are set by the
/// caller, so they are only honoured behind a trusted proxy.
fn rate_limit_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
    trust_proxy_headers: bool,
) -> String {
    let ip = if trust_proxy_headers {
        client_ip(headers, connect_info)
    } else {
        connect_info.map(|ConnectInfo(addr)| addr.ip().to_string())
    };
    ip.unwrap_or_else(|| "unknown".to_string())
}

fn rate_limit_key(bucket: &str, ip: &str) -> String {
    format!("rate_limit:{}:{}", bucket, ip)
}

/// Get (max requests, window seconds) for a bucket
fn get_rate_limit(bucket: &str, admin_per_minute: i64) -> (i64, i64) {
    match bucket {
        "auth" => (rate_limits::AUTH_MAX_REQUESTS, rate_limits::AUTH_WINDOW_SECS),
        _ => (admin_per_minute, rate_limits::ADMIN_WINDOW_SECS),
    }
}

/// Get bucket for path (for grouping similar endpoints)
fn path_bucket(path: &str) -> &'static str {
    match path.strip_prefix(API_BASE_PATH) {
        Some(rest) if rest.starts_with("/auth") => "auth",
        _ => "admin",
    }
}
