use axum::http::{header, HeaderMap, HeaderValue};
use std::time::Duration;
use uuid::Uuid;

use super::types::SessionId;
use crate::utils::error::ApiError;

/// Finds the session id in the request cookies. Malformed values are ignored.
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == cookie_name)
        .find_map(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

pub fn session_cookie(
    cookie_name: &str,
    id: SessionId,
    max_age: Duration,
) -> Result<HeaderValue, ApiError> {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        cookie_name,
        id,
        max_age.as_secs()
    );
    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::InternalError(format!("Invalid session cookie: {}", e)))
}
