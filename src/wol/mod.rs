//! Wake-on-LAN action.
//!
//! The wake action is a pass-through: it checks that a target is configured
//! and hands the address to a [`MagicPacketSender`]. Sender failures are
//! converted into [`WakeError::Transmission`] carrying the underlying message.

mod mac;
mod packet;

pub use mac::{MacAddress, MacAddressError};
pub use packet::{
    magic_packet, UdpMagicPacketSender, DEFAULT_BROADCAST_IP, DEFAULT_WOL_PORT, MAGIC_PACKET_LEN,
};

use std::{io, sync::Arc};
use thiserror::Error;
use tracing::{error, info};

/// Transmits a magic packet for the given address.
pub trait MagicPacketSender: Send + Sync {
    /// # Errors
    /// Returns an error if the packet could not be sent.
    fn send(&self, mac: &MacAddress) -> io::Result<()>;
}

#[derive(Debug, Error)]
pub enum WakeError {
    #[error("Target MAC address not configured")]
    NotConfigured,
    #[error("Failed to send wake packet: {0}")]
    Transmission(String),
}

pub struct WakeService {
    target: Option<MacAddress>,
    sender: Arc<dyn MagicPacketSender>,
}

impl WakeService {
    pub fn new(target: Option<MacAddress>, sender: Arc<dyn MagicPacketSender>) -> Self {
        Self { target, sender }
    }

    #[must_use]
    pub fn target(&self) -> Option<MacAddress> {
        self.target
    }

    /// Send one magic packet to the configured target.
    ///
    /// # Errors
    /// Returns [`WakeError::NotConfigured`] when no target is set, before any
    /// transmission is attempted, and [`WakeError::Transmission`] when the
    /// sender fails.
    pub fn wake(&self) -> Result<MacAddress, WakeError> {
        let Some(target) = self.target else {
            error!("wake requested but no target MAC address is configured");
            return Err(WakeError::NotConfigured);
        };

        match self.sender.send(&target) {
            Ok(()) => {
                info!("Wake-on-LAN packet sent to {target}");
                Ok(target)
            }
            Err(err) => {
                error!("Failed to send wake packet to {target}: {err}");
                Err(WakeError::Transmission(err.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for WakeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WakeService")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
