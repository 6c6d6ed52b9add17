use anyhow::{anyhow, bail, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

use crate::auth::{AuthMode, Environment, DEFAULT_SESSION_TTL_SECONDS};

pub const ARG_AUTH_USERNAME: &str = "auth-username";
pub const ARG_AUTH_PASSWORD: &str = "auth-password";
pub const ARG_SECRET_KEY: &str = "secret-key";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_ENVIRONMENT: &str = "environment";
pub const ARG_AUTH_MODE: &str = "auth-mode";

#[derive(Debug, Clone)]
pub struct Options {
    pub username: String,
    pub password: SecretString,
    pub secret_key: Option<SecretString>,
    pub session_ttl_seconds: i64,
    pub environment: Environment,
    pub mode: AuthMode,
}

impl Options {
    /// Parse authentication arguments from matches.
    ///
    /// # Errors
    /// Returns an error if credentials are missing or a value cannot be parsed.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
        };

        let Some(username) = get_non_empty(ARG_AUTH_USERNAME) else {
            bail!("missing required argument: --{ARG_AUTH_USERNAME}");
        };
        let Some(password) = get_non_empty(ARG_AUTH_PASSWORD) else {
            bail!("missing required argument: --{ARG_AUTH_PASSWORD}");
        };

        let session_ttl_seconds = matches
            .get_one::<i64>(ARG_SESSION_TTL_SECONDS)
            .copied()
            .unwrap_or(DEFAULT_SESSION_TTL_SECONDS);
        if session_ttl_seconds <= 0 {
            bail!("--{ARG_SESSION_TTL_SECONDS} must be positive");
        }

        let environment = get_non_empty(ARG_ENVIRONMENT)
            .map(|value| value.parse::<Environment>())
            .transpose()
            .map_err(|err| anyhow!(err))?
            .unwrap_or_default();
        let mode = get_non_empty(ARG_AUTH_MODE)
            .map(|value| value.parse::<AuthMode>())
            .transpose()
            .map_err(|err| anyhow!(err))?
            .unwrap_or_default();

        Ok(Self {
            username,
            password: SecretString::from(password),
            secret_key: get_non_empty(ARG_SECRET_KEY).map(SecretString::from),
            session_ttl_seconds,
            environment,
            mode,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_AUTH_USERNAME)
                .long(ARG_AUTH_USERNAME)
                .help("Username allowed to send wake requests")
                .env("WOLGATE_AUTH_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTH_PASSWORD)
                .long(ARG_AUTH_PASSWORD)
                .help("Password for the configured username")
                .env("WOLGATE_AUTH_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_SECRET_KEY)
                .long(ARG_SECRET_KEY)
                .help("Session signing key (at least 32 bytes)")
                .long_help(
                    "Session signing key (at least 32 bytes). Required in production. \
                     In development a random key is generated at startup and sessions \
                     do not survive a restart.",
                )
                .env("WOLGATE_SECRET_KEY")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session cookie TTL in seconds")
                .env("WOLGATE_SESSION_TTL_SECONDS")
                .default_value("604800")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_ENVIRONMENT)
                .long(ARG_ENVIRONMENT)
                .help("Deployment environment: development or production")
                .env("WOLGATE_ENVIRONMENT")
                .default_value("development"),
        )
        .arg(
            Arg::new(ARG_AUTH_MODE)
                .long(ARG_AUTH_MODE)
                .help("Authentication scheme: session (login form) or basic (HTTP Basic)")
                .env("WOLGATE_AUTH_MODE")
                .default_value("session"),
        )
}
