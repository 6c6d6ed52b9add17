use super::{
    error::ErrorResponse,
    handlers::{health, login, logout, root, wake},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        root::root,
        login::login,
        logout::logout,
        wake::wake,
    ),
    components(schemas(
        health::Health,
        login::LoginForm,
        wake::WakeResponse,
        ErrorResponse,
    )),
    tags(
        (name = "wolgate", description = "Wake-on-LAN control"),
        (name = "auth", description = "Session login and logout"),
        (name = "health", description = "Service health"),
    )
)]
struct ApiDoc;

/// `OpenAPI` document for every route the server can mount.
///
/// Info (title, version, description, license) is taken from Cargo metadata.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
