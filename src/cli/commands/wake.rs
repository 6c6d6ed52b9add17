use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::net::Ipv4Addr;

use crate::wol::{MacAddress, DEFAULT_BROADCAST_IP, DEFAULT_WOL_PORT};

pub const ARG_TARGET_MAC: &str = "target-mac";
pub const ARG_BROADCAST_IP: &str = "broadcast-ip";
pub const ARG_WOL_PORT: &str = "wol-port";

#[derive(Debug, Clone)]
pub struct Options {
    pub target_mac: Option<MacAddress>,
    pub broadcast_ip: Ipv4Addr,
    pub port: u16,
}

impl Options {
    /// Parse wake target arguments from matches.
    ///
    /// An empty target counts as unset; wake requests then fail at runtime.
    ///
    /// # Errors
    /// Returns an error if the target MAC address is malformed.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let target_mac = matches
            .get_one::<String>(ARG_TARGET_MAC)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(MacAddress::parse)
            .transpose()
            .with_context(|| format!("invalid --{ARG_TARGET_MAC}"))?;

        Ok(Self {
            target_mac,
            broadcast_ip: matches
                .get_one::<Ipv4Addr>(ARG_BROADCAST_IP)
                .copied()
                .unwrap_or(DEFAULT_BROADCAST_IP),
            port: matches
                .get_one::<u16>(ARG_WOL_PORT)
                .copied()
                .unwrap_or(DEFAULT_WOL_PORT),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_TARGET_MAC)
                .long(ARG_TARGET_MAC)
                .help("MAC address of the machine to wake, example: 00:11:22:33:44:55")
                .env("WOLGATE_TARGET_MAC"),
        )
        .arg(
            Arg::new(ARG_BROADCAST_IP)
                .long(ARG_BROADCAST_IP)
                .help("Broadcast address the magic packet is sent to")
                .env("WOLGATE_BROADCAST_IP")
                .default_value("255.255.255.255")
                .value_parser(clap::value_parser!(Ipv4Addr)),
        )
        .arg(
            Arg::new(ARG_WOL_PORT)
                .long(ARG_WOL_PORT)
                .help("UDP port the magic packet is sent to")
                .env("WOLGATE_WOL_PORT")
                .default_value("9")
                .value_parser(clap::value_parser!(u16)),
        )
}
