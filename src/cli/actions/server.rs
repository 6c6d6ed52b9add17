use crate::{
    api,
    auth::{AuthConfig, AuthMode, AuthState, Credentials, Environment, SessionManager},
    cli::telemetry,
    wol::{MacAddress, UdpMagicPacketSender, WakeService},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{net::Ipv4Addr, sync::Arc};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub target_mac: Option<MacAddress>,
    pub broadcast_ip: Ipv4Addr,
    pub wol_port: u16,
    pub username: String,
    pub password: SecretString,
    pub secret_key: Option<SecretString>,
    pub session_ttl_seconds: i64,
    pub environment: Environment,
    pub auth_mode: AuthMode,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the signing key is unusable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let config = AuthConfig::new(args.auth_mode)
        .with_environment(args.environment)
        .with_session_ttl_seconds(args.session_ttl_seconds);

    let sessions = SessionManager::from_config(args.secret_key.as_ref(), &config)
        .context("Failed to initialize session signing key")?;

    let auth_state = Arc::new(AuthState::new(
        config,
        Credentials::new(args.username, args.password),
        sessions,
    ));

    let sender = UdpMagicPacketSender::new(args.broadcast_ip, args.wol_port);
    let wake_service = Arc::new(WakeService::new(args.target_mac, Arc::new(sender)));

    let result = api::new(args.port, auth_state, wake_service).await;

    telemetry::shutdown_tracer();

    result
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        (
            "target_mac",
            args.target_mac
                .map_or_else(|| "unset".to_string(), |mac| mac.to_string()),
        ),
        (
            "broadcast",
            format!("{}:{}", args.broadcast_ip, args.wol_port),
        ),
        ("auth_mode", args.auth_mode.to_string()),
        ("environment", args.environment.to_string()),
        ("auth_username", args.username.clone()),
        ("auth_password", "set".to_string()),
        (
            "secret_key",
            if args.secret_key.is_some() {
                "set".to_string()
            } else {
                "unset".to_string()
            },
        ),
        (
            "session_ttl_seconds",
            args.session_ttl_seconds.to_string(),
        ),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", wolgate_banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn wolgate_banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    WOLGATE_BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

const WOLGATE_BANNER: &str = r"
    .-------.
    | (  )  |
    |  \/   |
    '---+---'
        |
  ======+======  W O L G A T E {VERSION}";
