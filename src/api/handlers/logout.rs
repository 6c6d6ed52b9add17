use axum::{
    extract::Extension,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::{
    api::error::ApiError,
    auth::{clear_session_cookie, AuthState},
};

#[utoipa::path(
    post,
    path= "/logout",
    responses (
        (status = 303, description = "Session cookie cleared, redirect to /"),
    ),
    tag= "auth"
)]
// The token itself stays valid until it expires; only the browser copy is removed.
pub async fn logout(Extension(auth): Extension<Arc<AuthState>>) -> Result<Response, ApiError> {
    let cookie = clear_session_cookie(auth.config()).map_err(|err| {
        error!("Failed to build logout cookie: {err}");
        ApiError::Internal("Failed to clear session".to_string())
    })?;

    debug!("session cookie cleared");

    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
