//! Session token issuing/verification and the session cookie.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, SecretSlice, SecretString};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{
    state::{AuthConfig, AuthMode},
    token::{sign_hs256, verify_hs256, SessionClaims, TokenError},
};

pub const SESSION_COOKIE_NAME: &str = "wolgate_session";

/// Issues and validates signed, self-contained session tokens.
pub struct SessionManager {
    key: SecretSlice<u8>,
    ttl_seconds: i64,
    ephemeral: bool,
}

impl SessionManager {
    /// Minimum signing key length in bytes (256 bits).
    pub const MIN_KEY_LENGTH: usize = 32;

    /// # Errors
    /// Returns an error if the key is shorter than [`Self::MIN_KEY_LENGTH`].
    pub fn new(key: &[u8], ttl_seconds: i64) -> Result<Self, TokenError> {
        if key.len() < Self::MIN_KEY_LENGTH {
            return Err(TokenError::KeyTooShort {
                actual: key.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        Ok(Self {
            key: SecretSlice::from(key.to_vec()),
            ttl_seconds,
            ephemeral: false,
        })
    }

    /// Build a manager with a random key that only lives as long as the process.
    ///
    /// # Errors
    /// Returns an error if the OS random source fails.
    pub fn ephemeral(ttl_seconds: i64) -> Result<Self, TokenError> {
        let mut bytes = vec![0u8; Self::MIN_KEY_LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| TokenError::KeyGeneration)?;
        Ok(Self {
            key: SecretSlice::from(bytes),
            ttl_seconds,
            ephemeral: true,
        })
    }

    /// Pick the signing key for this process.
    ///
    /// A configured key is always used. Without one, production refuses to
    /// start and development falls back to an ephemeral key with a warning.
    /// Basic deployments never issue tokens, so they get an ephemeral key
    /// silently.
    ///
    /// # Errors
    /// Returns an error if the configured key is too short, or if no key is
    /// configured in production.
    pub fn from_config(
        secret_key: Option<&SecretString>,
        config: &AuthConfig,
    ) -> Result<Self, TokenError> {
        match secret_key {
            Some(key) => Self::new(key.expose_secret().as_bytes(), config.session_ttl_seconds()),
            None if config.mode() == AuthMode::Basic => {
                Self::ephemeral(config.session_ttl_seconds())
            }
            None if config.environment().is_production() => Err(TokenError::MissingKey),
            None => {
                warn!(
                    "No session signing key configured; using an ephemeral key. \
                     All sessions are invalidated on every restart. \
                     Set WOLGATE_SECRET_KEY to keep sessions across restarts."
                );
                Self::ephemeral(config.session_ttl_seconds())
            }
        }
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Issue a token for `subject` that expires after the configured lifetime.
    ///
    /// # Errors
    /// Returns an error if the token cannot be encoded.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, now_unix_seconds())
    }

    /// # Errors
    /// Returns an error if the token cannot be encoded.
    pub fn issue_at(&self, subject: &str, now_unix_seconds: i64) -> Result<String, TokenError> {
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: now_unix_seconds,
            exp: now_unix_seconds.saturating_add(self.ttl_seconds),
            jti: Uuid::new_v4().to_string(),
        };
        debug!(jti = %claims.jti, exp = claims.exp, "issuing session token");
        sign_hs256(self.key.expose_secret(), &claims)
    }

    /// Return the embedded subject when the token is authentic and unexpired.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<String> {
        self.verify_at(token, now_unix_seconds())
    }

    #[must_use]
    pub fn verify_at(&self, token: &str, now_unix_seconds: i64) -> Option<String> {
        match verify_hs256(token, self.key.expose_secret(), now_unix_seconds) {
            Ok(claims) => Some(claims.sub),
            Err(err) => {
                debug!("session token rejected: {err}");
                None
            }
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("ephemeral", &self.ephemeral)
            .finish_non_exhaustive()
    }
}

fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
        })
}

/// Build a secure `HttpOnly` cookie for the session token.
pub(crate) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
