//! Map parsed CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{auth, wake, ARG_PORT};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or malformed.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8000);

    let wake_opts = wake::Options::parse(matches)?;
    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        target_mac: wake_opts.target_mac,
        broadcast_ip: wake_opts.broadcast_ip,
        wol_port: wake_opts.port,
        username: auth_opts.username,
        password: auth_opts.password,
        secret_key: auth_opts.secret_key,
        session_ttl_seconds: auth_opts.session_ttl_seconds,
        environment: auth_opts.environment,
        auth_mode: auth_opts.mode,
    }))
}
