use crate::constants::*;
use crate::{Result, Socks5Error};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// Username/password pair for RFC 1929 authentication.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    username: Vec<u8>,
    password: Vec<u8>,
}

impl Credentials {
    /// Both fields are length-prefixed by a single byte on the wire, so
    /// anything longer than 255 bytes is refused here, before any I/O.
    pub fn new<S: Into<Vec<u8>>>(
        username: S,
        password: S,
    ) -> Result<Self> {
        let username = username.into();
        let password = password.into();

        ensure_fits("Username", &username)?;
        ensure_fits("Password", &password)?;

        Ok(Credentials { username, password })
    }

    pub fn username(&self) -> &[u8] {
        &self.username
    }

    pub fn password(&self) -> &[u8] {
        &self.password
    }

    /// Username/password request: `01 ulen username plen password`.
    pub fn as_socks_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(2 + self.username.len() + 1 + self.password.len());
        bytes.put_u8(SOCKS_AUTH_VER);

        // Append username
        bytes.put_u8(self.username.len() as u8);
        bytes.put_slice(&self.username);

        // Append password
        bytes.put_u8(self.password.len() as u8);
        bytes.put_slice(&self.password);

        bytes.freeze()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &String::from_utf8_lossy(&self.username))
            .field("password", &"<redacted>")
            .finish()
    }
}

fn ensure_fits(
    field: &'static str,
    value: &[u8],
) -> Result<()> {
    if value.len() > SOCKS_MAX_CREDENTIAL_LEN {
        return Err(Socks5Error::InvalidCredentials {
            field,
            length: value.len(),
        });
    }

    Ok(())
}
