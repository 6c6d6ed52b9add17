//! Credential verification, session tokens, and request authentication.
//!
//! Sessions are stateless: the cookie carries an HS256 token whose signature
//! and expiry are checked on every request. Nothing is stored server-side, so
//! logout only removes the cookie from the browser.
//!
//! > **Warning:** Without `WOLGATE_SECRET_KEY` a development instance signs
//! > with an ephemeral key, and every restart logs all users out.

mod credentials;
mod principal;
mod session;
mod state;
mod token;

pub use credentials::Credentials;
pub use principal::{current_user, require_auth, AuthError, Principal};
pub use session::{SessionManager, SESSION_COOKIE_NAME};
pub(crate) use session::{clear_session_cookie, session_cookie};
pub use state::{AuthConfig, AuthMode, AuthState, Environment, DEFAULT_SESSION_TTL_SECONDS};
pub use token::{SessionClaims, TokenError};
