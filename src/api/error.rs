//! Mapping from domain errors to HTTP responses.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    auth::{AuthError, AuthMode},
    wol::WakeError,
};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{error}")]
    Unauthorized { error: AuthError, challenge: bool },
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Wake(#[from] WakeError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Basic deployments answer with a `WWW-Authenticate` challenge so
    /// browsers prompt for credentials.
    #[must_use]
    pub fn unauthorized(error: AuthError, mode: AuthMode) -> Self {
        Self::Unauthorized {
            error,
            challenge: mode == AuthMode::Basic,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Wake(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });
        let mut response = (status, body).into_response();
        if let Self::Unauthorized {
            challenge: true, ..
        } = self
        {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}
