use axum::{extract::Extension, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::{
    api::error::{ApiError, ErrorResponse},
    auth::{require_auth, AuthState},
    wol::WakeService,
};

pub const WAKE_SUCCESS_MESSAGE: &str = "Wake-on-LAN packet sent successfully";

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct WakeResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path= "/wake",
    responses (
        (status = 200, description = "Magic packet sent", body = WakeResponse),
        (status = 401, description = "Not authenticated or incorrect credentials", body = ErrorResponse),
        (status = 500, description = "Target not configured or the packet could not be sent", body = ErrorResponse),
    ),
    tag= "wolgate"
)]
#[instrument(skip_all)]
pub async fn wake(
    headers: HeaderMap,
    Extension(auth): Extension<Arc<AuthState>>,
    Extension(service): Extension<Arc<WakeService>>,
) -> Result<Json<WakeResponse>, ApiError> {
    let principal = require_auth(&headers, &auth)
        .map_err(|err| ApiError::unauthorized(err, auth.config().mode()))?;

    debug!(username = %principal.username, "wake requested");

    service.wake()?;

    Ok(Json(WakeResponse {
        message: WAKE_SUCCESS_MESSAGE.to_string(),
    }))
}
