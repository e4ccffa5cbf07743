use crate::socks5;
use std::convert::Infallible;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Socks5Error>;

#[derive(Debug, Error)]
pub enum Socks5Error {
    /// Destination is not a dotted quad of four octets.
    #[error("Invalid IPv4 destination '{0}', expected x.x.x.x with each x in 0-255.")]
    InvalidAddress(String),

    #[error("Invalid proxy address: {0}")]
    InvalidProxyAddress(String),

    /// Username or password does not fit the one-byte length field.
    #[error("{field} is {length} bytes long, but MUST NOT be larger than 255 bytes.")]
    InvalidCredentials { field: &'static str, length: usize },

    /// Failure of the underlying stream, passed through as-is.
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("Proxy did not select username/password authentication (version: {version:#04x}, method: {method:#04x}).")]
    MethodNotSupported { version: u8, method: u8 },

    #[error("Proxy rejected the provided credentials (status: {status:#04x}).")]
    AuthorizationFailed { status: u8 },

    #[error("CONNECT did not succeed: {} ({:#04x}).", socks5::reply_reason(.reply), .reply)]
    ConnectionRequestFailed { reply: u8 },
}

impl Socks5Error {
    /// Raw status byte reported by the proxy, if the failure came from one.
    pub fn status(&self) -> Option<u8> {
        match self {
            Socks5Error::MethodNotSupported { method, .. } => Some(*method),
            Socks5Error::AuthorizationFailed { status } => Some(*status),
            Socks5Error::ConnectionRequestFailed { reply } => Some(*reply),
            _ => None,
        }
    }
}

impl From<Infallible> for Socks5Error {
    fn from(infallible: Infallible) -> Self {
        match infallible {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_failure_names_reply_code() {
        let error = Socks5Error::ConnectionRequestFailed { reply: 0x05 };
        assert_eq!(error.to_string(), "CONNECT did not succeed: connection refused (0x05).");
        assert_eq!(error.status(), Some(0x05));
    }

    #[test]
    fn unassigned_reply_code_is_still_reported() {
        let error = Socks5Error::ConnectionRequestFailed { reply: 0x42 };
        assert_eq!(error.to_string(), "CONNECT did not succeed: unassigned reply code (0x42).");
    }

    #[test]
    fn method_failure_keeps_raw_bytes() {
        let error = Socks5Error::MethodNotSupported {
            version: 0x05,
            method: 0xFF,
        };
        assert_eq!(
            error.to_string(),
            "Proxy did not select username/password authentication (version: 0x05, method: 0xff)."
        );
        assert_eq!(error.status(), Some(0xFF));
    }

    #[test]
    fn io_errors_convert_verbatim() {
        let error: Socks5Error = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        match error {
            Socks5Error::Transport(inner) => assert_eq!(inner.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
