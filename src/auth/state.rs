//! Auth configuration and shared state.

use std::{fmt, str::FromStr};

use super::{credentials::Credentials, session::SessionManager};

pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// How protected routes authenticate requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Login form plus signed session cookie.
    #[default]
    Session,
    /// HTTP Basic credentials on every request.
    Basic,
}

impl AuthMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Basic => "basic",
        }
    }
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "session" => Ok(Self::Session),
            "basic" => Ok(Self::Basic),
            other => Err(format!("invalid auth mode: {other}")),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment environment; production turns on `Secure` cookies and
/// requires an explicit signing key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            other => Err(format!("invalid environment: {other}")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    mode: AuthMode,
    environment: Environment,
    session_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            environment: Environment::default(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    pub(crate) fn session_cookie_secure(&self) -> bool {
        self.environment.is_production()
    }
}

pub struct AuthState {
    config: AuthConfig,
    credentials: Credentials,
    sessions: SessionManager,
}

impl AuthState {
    /// The cookie `Max-Age` always follows the session manager's token lifetime.
    #[must_use]
    pub fn new(config: AuthConfig, credentials: Credentials, sessions: SessionManager) -> Self {
        Self {
            config: config.with_session_ttl_seconds(sessions.ttl_seconds()),
            credentials,
            sessions,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("sessions", &self.sessions)
            .finish()
    }
}
