pub mod auth;
pub mod logging;
pub mod wake;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("wolgate")
        .about("Authenticated Wake-on-LAN gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8000")
                .env("WOLGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = wake::with_args(command);
    let command = auth::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{AuthMode, Environment},
        wol::MacAddress,
    };
    use anyhow::Result;
    use secrecy::ExposeSecret;
    use std::net::Ipv4Addr;

    const ENV_VARS: [&str; 11] = [
        "WOLGATE_PORT",
        "WOLGATE_TARGET_MAC",
        "WOLGATE_BROADCAST_IP",
        "WOLGATE_WOL_PORT",
        "WOLGATE_AUTH_USERNAME",
        "WOLGATE_AUTH_PASSWORD",
        "WOLGATE_SECRET_KEY",
        "WOLGATE_SESSION_TTL_SECONDS",
        "WOLGATE_ENVIRONMENT",
        "WOLGATE_AUTH_MODE",
        "WOLGATE_LOG_LEVEL",
    ];

    // Run `f` with every WOLGATE_* variable cleared, then `vars` applied.
    fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let mut all: Vec<(&str, Option<&str>)> =
            ENV_VARS.iter().map(|name| (*name, None)).collect();
        for (name, value) in vars {
            if let Some(entry) = all.iter_mut().find(|(key, _)| key == name) {
                entry.1 = Some(*value);
            }
        }
        temp_env::with_vars(all, f)
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "wolgate");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Authenticated Wake-on-LAN gateway".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() -> Result<()> {
        with_env(&[], || -> Result<()> {
            let matches = new().try_get_matches_from(vec![
                "wolgate",
                "--auth-username",
                "admin",
                "--auth-password",
                "secret",
            ])?;
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8000));

            let wake = wake::Options::parse(&matches)?;
            assert_eq!(wake.target_mac, None);
            assert_eq!(wake.broadcast_ip, Ipv4Addr::BROADCAST);
            assert_eq!(wake.port, 9);

            let auth = auth::Options::parse(&matches)?;
            assert_eq!(auth.username, "admin");
            assert_eq!(auth.password.expose_secret(), "secret");
            assert!(auth.secret_key.is_none());
            assert_eq!(auth.session_ttl_seconds, 604_800);
            assert_eq!(auth.environment, Environment::Development);
            assert_eq!(auth.mode, AuthMode::Session);
            Ok(())
        })
    }

    #[test]
    fn test_check_args() -> Result<()> {
        with_env(&[], || -> Result<()> {
            let matches = new().try_get_matches_from(vec![
                "wolgate",
                "--port",
                "8080",
                "--target-mac",
                "00-11-22-33-44-55",
                "--broadcast-ip",
                "192.168.1.255",
                "--wol-port",
                "7",
                "--auth-username",
                "admin",
                "--auth-password",
                "secret",
                "--secret-key",
                "0123456789abcdef0123456789abcdef",
                "--session-ttl-seconds",
                "3600",
                "--environment",
                "production",
                "--auth-mode",
                "basic",
            ])?;
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));

            let wake = wake::Options::parse(&matches)?;
            assert_eq!(
                wake.target_mac,
                Some(MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]))
            );
            assert_eq!(wake.broadcast_ip, Ipv4Addr::new(192, 168, 1, 255));
            assert_eq!(wake.port, 7);

            let auth = auth::Options::parse(&matches)?;
            assert_eq!(
                auth.secret_key.as_ref().map(|key| key.expose_secret().to_string()),
                Some("0123456789abcdef0123456789abcdef".to_string())
            );
            assert_eq!(auth.session_ttl_seconds, 3600);
            assert_eq!(auth.environment, Environment::Production);
            assert_eq!(auth.mode, AuthMode::Basic);
            Ok(())
        })
    }

    #[test]
    fn test_check_env() -> Result<()> {
        with_env(
            &[
                ("WOLGATE_PORT", "443"),
                ("WOLGATE_TARGET_MAC", "AA:BB:CC:DD:EE:FF"),
                ("WOLGATE_AUTH_USERNAME", "testuser"),
                ("WOLGATE_AUTH_PASSWORD", "testpass"),
                ("WOLGATE_AUTH_MODE", "BASIC"),
                ("WOLGATE_LOG_LEVEL", "info"),
            ],
            || -> Result<()> {
                let matches = new().try_get_matches_from(vec!["wolgate"])?;
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );

                let wake = wake::Options::parse(&matches)?;
                assert_eq!(
                    wake.target_mac.map(|mac| mac.to_string()),
                    Some("aa:bb:cc:dd:ee:ff".to_string())
                );

                let auth = auth::Options::parse(&matches)?;
                assert_eq!(auth.username, "testuser");
                assert_eq!(auth.mode, AuthMode::Basic);
                Ok(())
            },
        )
    }

    #[test]
    fn test_empty_target_mac_is_unset() -> Result<()> {
        with_env(
            &[
                ("WOLGATE_TARGET_MAC", ""),
                ("WOLGATE_AUTH_USERNAME", "testuser"),
                ("WOLGATE_AUTH_PASSWORD", "testpass"),
            ],
            || -> Result<()> {
                let matches = new().try_get_matches_from(vec!["wolgate"])?;
                assert_eq!(wake::Options::parse(&matches)?.target_mac, None);
                Ok(())
            },
        )
    }

    #[test]
    fn test_malformed_target_mac_fails() -> Result<()> {
        with_env(&[], || -> Result<()> {
            let matches = new().try_get_matches_from(vec![
                "wolgate",
                "--target-mac",
                "not-a-mac",
                "--auth-username",
                "admin",
                "--auth-password",
                "secret",
            ])?;
            let result = wake::Options::parse(&matches);
            assert!(result.is_err());
            if let Err(err) = result {
                assert!(err.to_string().contains("--target-mac"));
            }
            Ok(())
        })
    }

    #[test]
    fn test_invalid_auth_mode_fails() -> Result<()> {
        with_env(&[], || -> Result<()> {
            let matches = new().try_get_matches_from(vec![
                "wolgate",
                "--auth-username",
                "admin",
                "--auth-password",
                "secret",
                "--auth-mode",
                "digest",
            ])?;
            assert!(auth::Options::parse(&matches).is_err());
            Ok(())
        })
    }

    #[test]
    fn test_non_positive_ttl_fails() -> Result<()> {
        with_env(&[], || -> Result<()> {
            let matches = new().try_get_matches_from(vec![
                "wolgate",
                "--auth-username",
                "admin",
                "--auth-password",
                "secret",
                "--session-ttl-seconds",
                "0",
            ])?;
            assert!(auth::Options::parse(&matches).is_err());
            Ok(())
        })
    }

    #[test]
    fn test_credentials_required() {
        with_env(&[], || {
            let result = new().try_get_matches_from(vec!["wolgate"]);
            assert_eq!(
                result.map_err(|e| e.kind()).err(),
                Some(clap::error::ErrorKind::MissingRequiredArgument)
            );
        });
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            with_env(
                &[
                    ("WOLGATE_LOG_LEVEL", level),
                    ("WOLGATE_AUTH_USERNAME", "testuser"),
                    ("WOLGATE_AUTH_PASSWORD", "testpass"),
                ],
                || {
                    let matches = new().get_matches_from(vec!["wolgate"]);
                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            with_env(&[], || {
                let mut args = vec![
                    "wolgate".to_string(),
                    "--auth-username".to_string(),
                    "testuser".to_string(),
                    "--auth-password".to_string(),
                    "testpass".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}
