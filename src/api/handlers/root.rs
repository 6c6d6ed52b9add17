use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::{
        error::{ApiError, ErrorResponse},
        pages,
    },
    auth::{current_user, require_auth, AuthMode, AuthState},
};

#[utoipa::path(
    get,
    path= "/",
    responses (
        (status = 200, description = "Control page, or the login page when no session is present", body = String, content_type = "text/html"),
        (status = 401, description = "Basic auth deployments only: missing or wrong credentials", body = ErrorResponse),
    ),
    tag= "wolgate"
)]
// Session deployments fall back to the login page, Basic deployments challenge.
pub async fn root(
    headers: HeaderMap,
    Extension(auth): Extension<Arc<AuthState>>,
) -> Result<Response, ApiError> {
    let mode = auth.config().mode();
    let principal = match mode {
        AuthMode::Session => match current_user(&headers, &auth) {
            Some(principal) => principal,
            None => {
                debug!("no valid session, serving login page");
                return Ok(Html(pages::login_page()).into_response());
            }
        },
        AuthMode::Basic => {
            require_auth(&headers, &auth).map_err(|err| ApiError::unauthorized(err, mode))?
        }
    };

    Ok(Html(pages::control_page(&principal.username, mode)).into_response())
}
