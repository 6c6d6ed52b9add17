//! Authenticated principal extraction.
//!
//! Flow Overview: depending on the configured [`AuthMode`], read either the
//! session cookie or HTTP Basic credentials, and return the principal that
//! downstream handlers act for.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64ct::{Base64, Encoding};
use thiserror::Error;
use tracing::debug;

use super::{session::extract_session_token, state::AuthMode, AuthState};

/// Authenticated user context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}

/// Authentication failures. Messages are deliberately generic so callers
/// cannot tell an unknown user from a wrong password.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Incorrect username or password")]
    InvalidCredentials,
}

/// Resolve the request into a principal, or fail with an [`AuthError`].
///
/// # Errors
/// Returns [`AuthError::NotAuthenticated`] when no usable session or Basic
/// header is present, and [`AuthError::InvalidCredentials`] when Basic
/// credentials do not match.
pub fn require_auth(headers: &HeaderMap, auth: &AuthState) -> Result<Principal, AuthError> {
    match auth.config().mode() {
        AuthMode::Session => {
            let token = extract_session_token(headers).ok_or(AuthError::NotAuthenticated)?;
            auth.sessions()
                .verify(&token)
                .map(|username| Principal { username })
                .ok_or(AuthError::NotAuthenticated)
        }
        AuthMode::Basic => {
            let (username, password) =
                extract_basic_credentials(headers).ok_or(AuthError::NotAuthenticated)?;
            if auth.credentials().verify(&username, &password) {
                Ok(Principal { username })
            } else {
                debug!("basic credentials rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

/// Like [`require_auth`] but treats every failure as "no user".
#[must_use]
pub fn current_user(headers: &HeaderMap, auth: &AuthState) -> Option<Principal> {
    require_auth(headers, auth).ok()
}

fn extract_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = Base64::decode_vec(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
