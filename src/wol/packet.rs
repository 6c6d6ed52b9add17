//! Magic packet layout and UDP broadcast transport.

use super::{MacAddress, MagicPacketSender};
use std::{
    io,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket},
};
use tracing::debug;

pub const DEFAULT_BROADCAST_IP: Ipv4Addr = Ipv4Addr::BROADCAST;
pub const DEFAULT_WOL_PORT: u16 = 9;

const SYNC_STREAM_LEN: usize = 6;
const MAC_REPETITIONS: usize = 16;
pub const MAGIC_PACKET_LEN: usize = SYNC_STREAM_LEN + MAC_REPETITIONS * 6;

/// Build the 102-byte payload: six `0xFF` bytes, then the address 16 times.
#[must_use]
pub fn magic_packet(mac: &MacAddress) -> [u8; MAGIC_PACKET_LEN] {
    let mut packet = [0xFF; MAGIC_PACKET_LEN];
    let octets = mac.octets();
    for chunk in packet[SYNC_STREAM_LEN..].chunks_exact_mut(octets.len()) {
        chunk.copy_from_slice(&octets);
    }
    packet
}

/// Sends magic packets as a single UDP datagram to a broadcast address.
#[derive(Clone, Debug)]
pub struct UdpMagicPacketSender {
    destination: SocketAddrV4,
}

impl UdpMagicPacketSender {
    #[must_use]
    pub fn new(broadcast_ip: Ipv4Addr, port: u16) -> Self {
        Self {
            destination: SocketAddrV4::new(broadcast_ip, port),
        }
    }

    #[must_use]
    pub fn destination(&self) -> SocketAddrV4 {
        self.destination
    }
}

impl Default for UdpMagicPacketSender {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_IP, DEFAULT_WOL_PORT)
    }
}

impl MagicPacketSender for UdpMagicPacketSender {
    fn send(&self, mac: &MacAddress) -> io::Result<()> {
        let socket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)))?;
        socket.set_broadcast(true)?;

        let packet = magic_packet(mac);
        let sent = socket.send_to(&packet, self.destination)?;
        if sent != packet.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {sent} of {} bytes", packet.len()),
            ));
        }

        debug!("magic packet for {mac} sent to {}", self.destination);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_layout() {
        let mac = MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let packet = magic_packet(&mac);

        assert_eq!(packet.len(), 102);
        assert_eq!(&packet[..6], &[0xFF; 6]);
        for repetition in packet[6..].chunks(6) {
            assert_eq!(repetition, &mac.octets());
        }
    }

    #[test]
    fn packet_for_broadcast_mac_is_all_ones() {
        let mac = MacAddress::new([0xFF; 6]);
        assert!(magic_packet(&mac).iter().all(|byte| *byte == 0xFF));
    }

    #[test]
    fn default_destination() {
        let sender = UdpMagicPacketSender::default();
        assert_eq!(
            sender.destination(),
            SocketAddrV4::new(Ipv4Addr::BROADCAST, 9)
        );
    }

    #[test]
    fn sends_packet_to_loopback_listener() -> anyhow::Result<()> {
        let listener = UdpSocket::bind("127.0.0.1:0")?;
        listener.set_read_timeout(Some(std::time::Duration::from_secs(2)))?;
        let port = listener.local_addr()?.port();

        let mac = MacAddress::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        UdpMagicPacketSender::new(Ipv4Addr::LOCALHOST, port).send(&mac)?;

        let mut buf = [0u8; 256];
        let (received, _) = listener.recv_from(&mut buf)?;
        assert_eq!(&buf[..received], &magic_packet(&mac));
        Ok(())
    }
}
