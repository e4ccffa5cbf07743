use crate::{Credentials, Result, Socks5Error};
use itertools::Itertools;
use std::convert::TryFrom;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use url::Url;

/// Endpoint of the SOCKS5 proxy itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ProxyAddress {
    pub host: String,
    pub port: u16,
}

impl ProxyAddress {
    pub fn new<S: Into<String>>(
        host: S,
        port: u16,
    ) -> Self {
        Self { host: host.into(), port }
    }

    /// Parses `socks5://[user[:pass]@]host:port`.
    ///
    /// Embedded credentials are returned next to the address, and are taken
    /// as written (no percent-decoding).
    pub fn parse(proxy_addr: &str) -> Result<(Self, Option<Credentials>)> {
        let proxy_addr = Url::parse(proxy_addr).map_err(|e| Socks5Error::InvalidProxyAddress(e.to_string()))?;

        if proxy_addr.scheme() != "socks5" {
            return Err(Socks5Error::InvalidProxyAddress(format!(
                "Unrecognized SOCKS scheme: {}",
                proxy_addr.scheme()
            )));
        }

        let host = match proxy_addr.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => {
                return Err(Socks5Error::InvalidProxyAddress(String::from(
                    "Missing explicit IP/host in proxy address.",
                )))
            }
        };
        let port = proxy_addr.port().ok_or_else(|| {
            Socks5Error::InvalidProxyAddress(String::from("Missing explicit port in proxy address."))
        })?;

        let username = proxy_addr.username();
        let credentials = if username.is_empty() {
            None
        } else {
            let password = proxy_addr.password().unwrap_or_default();
            Some(Credentials::new(username, password)?)
        };

        Ok((Self::new(host, port), credentials))
    }
}

impl fmt::Display for ProxyAddress {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "socks5://{}:{}", self.host, self.port)
    }
}

/// IPv4 destination of a CONNECT request, already validated for the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destination {
    octets: [u8; 4],
    port: u16,
}

impl Destination {
    /// Accepts exactly four dot-separated integers, each in 0-255.
    pub fn new(
        host: &str,
        port: u16,
    ) -> Result<Self> {
        let invalid = || Socks5Error::InvalidAddress(host.to_string());

        let (a, b, c, d) = host.split('.').collect_tuple().ok_or_else(invalid)?;
        let mut octets = [0; 4];
        for (octet, part) in octets.iter_mut().zip([a, b, c, d].iter()) {
            *octet = part.parse::<u8>().map_err(|_| invalid())?;
        }

        Ok(Destination { octets, port })
    }

    /// Parses `a.b.c.d:port`.
    pub fn parse(addr: &str) -> Result<Self> {
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| Socks5Error::InvalidAddress(addr.to_string()))?;

        let port = port
            .parse::<u16>()
            .map_err(|_| Socks5Error::InvalidAddress(addr.to_string()))?;

        Destination::new(host, port)
    }

    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Port in network byte order.
    pub fn port_bytes(&self) -> [u8; 2] {
        self.port.to_be_bytes()
    }
}

impl fmt::Display for Destination {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", SocketAddrV4::from(*self))
    }
}

impl From<SocketAddrV4> for Destination {
    fn from(addr: SocketAddrV4) -> Self {
        Destination {
            octets: addr.ip().octets(),
            port: addr.port(),
        }
    }
}

impl From<Destination> for SocketAddrV4 {
    fn from(destination: Destination) -> Self {
        SocketAddrV4::new(Ipv4Addr::from(destination.octets), destination.port)
    }
}

impl TryFrom<&str> for Destination {
    type Error = Socks5Error;

    fn try_from(addr: &str) -> Result<Self> {
        Destination::parse(addr)
    }
}

impl TryFrom<String> for Destination {
    type Error = Socks5Error;

    fn try_from(addr: String) -> Result<Self> {
        Destination::parse(&addr)
    }
}
