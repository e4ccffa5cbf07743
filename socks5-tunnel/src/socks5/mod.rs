use crate::constants::*;
use crate::Destination;
use num_traits::FromPrimitive;
use std::fmt;

mod s5_client;

pub use s5_client::Socks5Client;

/// Progress of a single client handshake. Phases only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandshakePhase {
    Init,
    MethodNegotiated,
    Authenticated,
    Connected,
}

impl HandshakePhase {
    ///
    ///
    ///
    pub fn next(self) -> Self {
        match self {
            HandshakePhase::Init => HandshakePhase::MethodNegotiated,
            HandshakePhase::MethodNegotiated => HandshakePhase::Authenticated,
            HandshakePhase::Authenticated | HandshakePhase::Connected => HandshakePhase::Connected,
        }
    }
}

impl fmt::Display for HandshakePhase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let phase = match self {
            HandshakePhase::Init => "init",
            HandshakePhase::MethodNegotiated => "method negotiated",
            HandshakePhase::Authenticated => "authenticated",
            HandshakePhase::Connected => "connected",
        };

        f.write_str(phase)
    }
}

#[derive(Clone, Debug)]
pub struct Socks5Request {
    pub destination: Destination,
}

impl Socks5Request {
    ///
    ///
    ///
    pub fn connect(destination: Destination) -> Self {
        Socks5Request { destination }
    }

    /// `05 01 00 01 addr4 port2`
    pub fn as_socks_bytes(&self) -> [u8; 10] {
        let [a, b, c, d] = self.destination.octets();
        let [hi, lo] = self.destination.port_bytes();

        [SOCKS_VER_5, SOCKS_CMD_CONNECT, SOCKS_RSV, SOCKS_ATYP_IPV4, a, b, c, d, hi, lo]
    }
}

#[repr(u8)]
#[derive(Clone, Debug, FromPrimitive, PartialEq)]
pub enum Socks5Reply {
    Success = 0x00,
    GeneralFailure = 0x01,
    ConnectionNotAllowed = 0x02,
    NetworkUnreachable = 0x03,
    HostUnreachable = 0x04,
    ConnectionRefused = 0x05,
    TTLExpired = 0x06,
    CommandNotSupported = 0x07,
    AddressTypeNotSupported = 0x08,
    ConnectionAttemptTimeOut = 0x09,
}

impl Socks5Reply {
    pub fn description(&self) -> &'static str {
        match self {
            Socks5Reply::Success => "succeeded",
            Socks5Reply::GeneralFailure => "general SOCKS server failure",
            Socks5Reply::ConnectionNotAllowed => "connection not allowed by ruleset",
            Socks5Reply::NetworkUnreachable => "network unreachable",
            Socks5Reply::HostUnreachable => "host unreachable",
            Socks5Reply::ConnectionRefused => "connection refused",
            Socks5Reply::TTLExpired => "TTL expired",
            Socks5Reply::CommandNotSupported => "command not supported",
            Socks5Reply::AddressTypeNotSupported => "address type not supported",
            Socks5Reply::ConnectionAttemptTimeOut => "connection attempt timed out",
        }
    }
}

pub(crate) fn reply_reason(reply: &u8) -> &'static str {
    Socks5Reply::from_u8(*reply)
        .map(|reply| reply.description())
        .unwrap_or("unassigned reply code")
}
