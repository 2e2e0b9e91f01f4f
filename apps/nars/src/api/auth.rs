//! # Authentication Module
//!
//! API key authentication for the NARS HTTP API.
//!
//! ## Configuration
//!
//! - `NARS_API_KEY`: if set and non-empty, every endpoint except `/health`
//!   requires `Authorization: Bearer <key>` (or the raw key)

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// The configured key, shared by every request.
pub type ApiKey = Arc<String>;

// =============================================================================
// API KEY AUTHENTICATION
// =============================================================================

/// Read the API key from `NARS_API_KEY`. Empty counts as unset.
pub fn get_api_key_from_env() -> Option<String> {
    std::env::var("NARS_API_KEY").ok().filter(|k| !k.is_empty())
}

/// Constant-time key comparison.
///
/// Both keys are zero-padded to a common length so the comparison always
/// touches the same number of bytes; the lengths are compared afterwards.
pub fn keys_match(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();

    let len = provided.len().max(expected.len());
    let mut a = vec![0u8; len];
    let mut b = vec![0u8; len];
    a[..provided.len()].copy_from_slice(provided);
    b[..expected.len()].copy_from_slice(expected);

    let same_bytes: bool = a.ct_eq(&b).into();
    same_bytes && provided.len() == expected.len()
}

/// Reject requests that do not carry the configured key.
pub async fn api_key_auth_middleware(
    State(expected): State<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v));

    match provided {
        Some(key) if keys_match(key, &expected) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!(
                event = "auth_failure",
                reason = "invalid_api_key",
                "Authentication failed: invalid API key"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_authorization_header",
                "Missing Authorization header"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_keys_match() {
        assert!(keys_match("secret", "secret"));
    }

    #[test]
    fn prefix_does_not_match() {
        assert!(!keys_match("sec", "secret"));
        assert!(!keys_match("secret-and-more", "secret"));
        assert!(!keys_match("", "secret"));
    }

    #[test]
    fn trailing_zero_bytes_do_not_match() {
        assert!(!keys_match("secret\0", "secret"));
    }
}
