//! Login rate limiting.
//!
//! The tracker itself ([`pitboss_core::rate_limit::AttemptTracker`]) is a
//! pure sliding-window structure; this module supplies the client-IP
//! extractor and the mutex-guarded helpers the login handlers call around
//! credential checks. A source that is blocked receives 429 before any
//! credential lookup happens.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use chrono::Utc;
use pitboss_core::error::CoreError;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;

/// Best-effort client address: `X-Forwarded-For` (first hop), then
/// `X-Real-IP`, then the socket peer address.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string());

        let real_ip = parts
            .headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0.ip().to_string());

        Ok(ClientIp(
            forwarded
                .or(real_ip)
                .or(peer)
                .unwrap_or_else(|| "unknown".to_string()),
        ))
    }
}

/// Reject the request with 429 if the source is currently blocked.
pub async fn check_blocked(state: &AppState, source: &str) -> Result<(), AppError> {
    let mut limiter = state.login_limiter.lock().await;
    if limiter.is_blocked(source, Utc::now()) {
        return Err(AppError::Core(CoreError::RateLimited(
            "Too many failed attempts. Please try again in 15 minutes.".into(),
        )));
    }
    Ok(())
}

/// Record a failed login. Returns 429 immediately when this failure trips
/// the threshold, so the caller can surface the block instead of a 401.
pub async fn record_failure(state: &AppState, source: &str) -> Option<AppError> {
    let mut limiter = state.login_limiter.lock().await;
    if limiter.record_failure(source, Utc::now()) {
        Some(AppError::Core(CoreError::RateLimited(
            "Too many failed attempts. Account temporarily locked.".into(),
        )))
    } else {
        None
    }
}

/// Record a successful login, clearing the source's failure history.
pub async fn record_success(state: &AppState, source: &str) {
    state.login_limiter.lock().await.record_success(source);
}
