use axum::{
    extract::{Extension, Form},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    api::error::{ApiError, ErrorResponse},
    auth::{session_cookie, AuthError, AuthState},
};

#[derive(ToSchema, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses (
        (status = 303, description = "Logged in, session cookie set, redirect to /"),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorResponse),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    Extension(auth): Extension<Arc<AuthState>>,
    payload: Option<Form<LoginForm>>,
) -> Result<Response, ApiError> {
    let Some(Form(form)) = payload else {
        return Err(ApiError::BadRequest(
            "Missing username or password".to_string(),
        ));
    };

    if !auth.credentials().verify(&form.username, &form.password) {
        warn!("login rejected");
        return Err(ApiError::unauthorized(
            AuthError::InvalidCredentials,
            auth.config().mode(),
        ));
    }

    let token = auth.sessions().issue(&form.username).map_err(|err| {
        error!("Failed to issue session token: {err}");
        ApiError::Internal("Failed to create session".to_string())
    })?;

    let cookie = session_cookie(auth.config(), &token).map_err(|err| {
        error!("Failed to build session cookie: {err}");
        ApiError::Internal("Failed to create session".to_string())
    })?;

    info!(username = %form.username, "login succeeded");

    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
