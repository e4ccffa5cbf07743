use crate::socks5::{HandshakePhase, Socks5Request};
use crate::{constants::*, Credentials, Destination, ProxyAddress, Result, Socks5Error};
use std::convert::TryInto;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;

/// Client side of a SOCKS5 handshake: IPv4 destinations, CONNECT only,
/// username/password authentication only.
#[derive(Clone, Debug)]
pub struct Socks5Client {
    proxy_addr: ProxyAddress,
    credentials: Credentials,
    timeout: Option<Duration>,
}

impl Socks5Client {
    ///
    ///
    ///
    pub fn new(
        proxy_addr: ProxyAddress,
        credentials: Credentials,
    ) -> Self {
        Socks5Client {
            proxy_addr,
            credentials,
            timeout: None,
        }
    }

    /// Bounds connecting to the proxy and the whole handshake.
    pub fn with_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn proxy_addr(&self) -> &ProxyAddress {
        &self.proxy_addr
    }

    /// Opens a TCP connection to the proxy and negotiates a tunnel to
    /// `destination`. The destination is validated before the proxy is
    /// contacted.
    pub async fn connect<A>(
        &self,
        destination: A,
    ) -> Result<TcpStream>
    where
        A: TryInto<Destination>,
        Socks5Error: From<A::Error>,
    {
        let destination: Destination = destination.try_into()?;

        let attempt = self.connect_and_handshake(&destination);

        match self.timeout {
            Some(timeout) => time::timeout(timeout, attempt).await.map_err(|_| {
                warn!("SOCKS5 handshake with {} timed out after {:?}.", self.proxy_addr, timeout);
                Socks5Error::Transport(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "SOCKS5 handshake timed out",
                ))
            })?,
            None => attempt.await,
        }
    }

    async fn connect_and_handshake(
        &self,
        destination: &Destination,
    ) -> Result<TcpStream> {
        let stream = TcpStream::connect((self.proxy_addr.host.as_str(), self.proxy_addr.port)).await?;
        debug!("Connected to proxy {}.", self.proxy_addr);

        self.handshake(stream, destination).await
    }

    /// Runs the three handshake exchanges over an already connected stream.
    ///
    /// On success the same stream is returned, now a transparent tunnel to
    /// `destination`. On failure the stream is dropped.
    ///
    /// [rfc1928] https://tools.ietf.org/html/rfc1928
    pub async fn handshake<S>(
        &self,
        mut stream: S,
        destination: &Destination,
    ) -> Result<S>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut phase = HandshakePhase::Init;
        debug!("SOCKS5 handshake with {} for {}: {}.", self.proxy_addr, destination, phase);

        while phase != HandshakePhase::Connected {
            match phase {
                HandshakePhase::Init => self.negotiate_auth_method(&mut stream).await?,
                HandshakePhase::MethodNegotiated => self.authenticate(&mut stream).await?,
                HandshakePhase::Authenticated => self.request_connect(&mut stream, destination).await?,
                HandshakePhase::Connected => unreachable!(),
            }

            phase = phase.next();
            debug!("SOCKS5 handshake with {} for {}: {}.", self.proxy_addr, destination, phase);
        }

        info!("Tunnel to {} established through {}.", destination, self.proxy_addr);

        Ok(stream)
    }

    /// Offers username/password as the only method.
    ///
    /// [rfc1928] https://tools.ietf.org/html/rfc1928
    async fn negotiate_auth_method<S>(
        &self,
        stream: &mut S,
    ) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let request = [SOCKS_VER_5, 0x01, SOCKS_AUTH_USERNAME_PASSWORD];
        stream.write_all(&request).await?;
        stream.flush().await?;

        let mut reply = [0; SOCKS_SHORT_REPLY_LEN];
        stream.read_exact(&mut reply).await?;

        let [version, method] = reply;
        if version != SOCKS_VER_5 || method != SOCKS_AUTH_USERNAME_PASSWORD {
            if method == SOCKS_AUTH_NO_ACCEPTABLE_METHODS {
                warn!("Proxy {} did not accept username/password authentication.", self.proxy_addr);
            } else {
                warn!(
                    "Proxy {} replied with version {} and method {} to the greeting.",
                    self.proxy_addr, version, method
                );
            }

            return Err(Socks5Error::MethodNotSupported { version, method });
        }

        Ok(())
    }

    ///
    ///
    ///
    /// [rfc1929] https://tools.ietf.org/html/rfc1929
    async fn authenticate<S>(
        &self,
        stream: &mut S,
    ) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let request = self.credentials.as_socks_bytes();
        stream.write_all(&request).await?;
        stream.flush().await?;

        let mut reply = [0; SOCKS_SHORT_REPLY_LEN];
        stream.read_exact(&mut reply).await?;

        // Only the status matters, the version byte is not checked.
        let status = reply[1];
        if status != SOCKS_AUTH_SUCCESS {
            warn!("Proxy {} rejected the credentials, status: {}.", self.proxy_addr, status);
            return Err(Socks5Error::AuthorizationFailed { status });
        }

        Ok(())
    }

    /// The bound address in the reply is read in full and discarded.
    ///
    /// [rfc1928] https://tools.ietf.org/html/rfc1928
    async fn request_connect<S>(
        &self,
        stream: &mut S,
        destination: &Destination,
    ) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let request = Socks5Request::connect(*destination).as_socks_bytes();
        stream.write_all(&request).await?;
        stream.flush().await?;

        let mut reply = [0; SOCKS_CONNECT_REPLY_LEN];
        stream.read_exact(&mut reply).await?;

        let reply = reply[1];
        if reply != SOCKS_REP_SUCCEEDED {
            warn!(
                "Proxy {} could not connect to {}, reply: {}.",
                self.proxy_addr, destination, reply
            );
            return Err(Socks5Error::ConnectionRequestFailed { reply });
        }

        Ok(())
    }
}
