//! Byte transport for the NNTP session
//!
//! The transport owns the underlying socket, either plain TCP or wrapped in
//! TLS, and exposes framed reads and raw writes. The inner layer is
//! replaceable: after the server accepts STARTTLS, the plain stream is taken
//! out, wrapped by the TLS connector, and put back without disturbing the
//! logical connection. The swap requires an empty read-ahead buffer; bytes
//! buffered in plaintext must never be interpreted as TLS data.

use crate::config::TlsOptions;
use crate::error::{NntpError, ProtocolViolation, Result};
use crate::framer::LineReader;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadBuf};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tracing::{debug, warn};

/// BufReader capacity for framed reads (64KB)
const READ_BUFFER_CAPACITY: usize = 64 * 1024;

/// Requested TCP receive buffer for overview and article downloads (1MB)
const RECV_BUFFER_SIZE: usize = 1024 * 1024;

/// The byte stream under the framer: plain TCP or TLS over TCP
pub(crate) enum NntpStream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl AsyncRead for NntpStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            NntpStream::Plain(s) => Pin::new(s).poll_read(cx, buf),
            NntpStream::Tls(s) => Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for NntpStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        match self.get_mut() {
            NntpStream::Plain(s) => Pin::new(s).poll_write(cx, buf),
            NntpStream::Tls(s) => Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            NntpStream::Plain(s) => Pin::new(s).poll_flush(cx),
            NntpStream::Tls(s) => Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            NntpStream::Plain(s) => Pin::new(s).poll_shutdown(cx),
            NntpStream::Tls(s) => Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}

/// Dangerous certificate verifier that accepts all certificates
///
/// **Security Warning:** disables all certificate validation, making the
/// connection vulnerable to man-in-the-middle attacks. Only reachable via
/// [`TlsOptions::allow_insecure_tls`].
#[derive(Debug)]
struct DangerousAcceptAnyCertificate;

impl ServerCertVerifier for DangerousAcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, tokio_rustls::rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, tokio_rustls::rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, tokio_rustls::rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

fn tls_connector(opts: &TlsOptions) -> Result<TlsConnector> {
    use tokio_rustls::rustls::crypto::{CryptoProvider, ring};
    let _ = CryptoProvider::install_default(ring::default_provider());

    let config = if opts.allow_insecure_tls {
        warn!("TLS certificate validation disabled - connection vulnerable to MITM attacks");
        ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(DangerousAcceptAnyCertificate))
            .with_no_client_auth()
    } else {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        for der in &opts.extra_root_certs {
            root_store
                .add(CertificateDer::from(der.clone()))
                .map_err(|e| NntpError::Tls(format!("invalid extra root certificate: {}", e)))?;
        }

        ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth()
    };

    Ok(TlsConnector::from(Arc::new(config)))
}

fn server_name(host: &str, opts: &TlsOptions) -> Result<ServerName<'static>> {
    let name = opts.sni_hostname.as_deref().unwrap_or(host);
    Ok(ServerName::try_from(name)
        .map_err(|e| NntpError::Tls(format!("invalid server name {:?}: {}", name, e)))?
        .to_owned())
}

/// Transport owning the byte stream and its framer
pub(crate) struct Transport {
    framer: LineReader<BufReader<NntpStream>>,
    tls: bool,
}

impl Transport {
    fn from_stream(stream: NntpStream, tls: bool) -> Self {
        Self {
            framer: LineReader::new(BufReader::with_capacity(READ_BUFFER_CAPACITY, stream)),
            tls,
        }
    }

    /// Open a plain TCP connection.
    pub async fn connect(host: &str, port: u16, deadline: Duration) -> Result<Self> {
        let tcp = tcp_connect(host, port, deadline).await?;
        Ok(Self::from_stream(NntpStream::Plain(tcp), false))
    }

    /// Open a TCP connection and complete a TLS handshake before any
    /// application byte is exchanged (implicit TLS).
    pub async fn connect_tls(
        host: &str,
        port: u16,
        deadline: Duration,
        opts: &TlsOptions,
    ) -> Result<Self> {
        let tcp = tcp_connect(host, port, deadline).await?;
        let connector = tls_connector(opts)?;
        let name = server_name(host, opts)?;

        let stream = timeout(deadline, connector.connect(name, tcp))
            .await
            .map_err(|_| NntpError::Timeout)?
            .map_err(|e| NntpError::Tls(format!("TLS handshake failed: {}", e)))?;

        Ok(Self::from_stream(NntpStream::Tls(Box::new(stream)), true))
    }

    /// Whether the stream is TLS-wrapped
    pub fn is_tls(&self) -> bool {
        self.tls
    }

    /// Write raw bytes and flush.
    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.framer.get_mut();
        stream.write_all(bytes).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Read one framed line.
    pub async fn read_line(&mut self) -> Result<String> {
        self.framer.read_line().await
    }

    /// Read a dot-terminated multi-line payload.
    pub async fn read_multiline(&mut self) -> Result<Vec<String>> {
        self.framer.read_multiline().await
    }

    /// Stream a dot-terminated multi-line payload into `sink`.
    pub async fn read_multiline_into<W>(&mut self, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        self.framer.read_multiline_into(sink).await
    }

    /// Wrap the established plain stream in TLS.
    ///
    /// Must only be called at a synchronized point: immediately after the
    /// 382 line has been read and before any further read. Unread bytes in
    /// the framer mean the server (or an interloper) sent plaintext past the
    /// upgrade boundary, which is unrecoverable. Consumes the transport; on
    /// error the connection is gone and the caller must mark the session
    /// disconnected.
    pub async fn upgrade_to_tls(
        self,
        host: &str,
        deadline: Duration,
        opts: &TlsOptions,
    ) -> Result<Self> {
        if self.tls {
            return Err(NntpError::TlsAlreadyEnabled);
        }
        if self.framer.has_buffered_input() {
            return Err(ProtocolViolation::DirtyTlsBoundary.into());
        }

        let tcp = match self.framer.into_inner().into_inner() {
            NntpStream::Plain(tcp) => tcp,
            NntpStream::Tls(_) => return Err(NntpError::TlsAlreadyEnabled),
        };

        let connector = tls_connector(opts)?;
        let name = server_name(host, opts)?;

        debug!("Starting TLS handshake with {}", host);
        let stream = timeout(deadline, connector.connect(name, tcp))
            .await
            .map_err(|_| NntpError::Timeout)?
            .map_err(|e| NntpError::Tls(format!("TLS handshake failed: {}", e)))?;

        Ok(Self::from_stream(NntpStream::Tls(Box::new(stream)), true))
    }
}

/// Establish the TCP connection with NNTP-appropriate socket options.
async fn tcp_connect(host: &str, port: u16, deadline: Duration) -> Result<TcpStream> {
    use socket2::{Domain, Protocol, Socket, Type};
    use std::net::ToSocketAddrs;

    debug!("Connecting to {}:{}", host, port);

    let addr = format!("{}:{}", host, port);
    let socket_addr = addr
        .to_socket_addrs()
        .map_err(NntpError::Io)?
        .next()
        .ok_or_else(|| {
            NntpError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "no address resolved",
            ))
        })?;

    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).map_err(NntpError::Io)?;

    // Low-latency request/response pattern
    socket.set_nodelay(true).map_err(NntpError::Io)?;

    // A larger receive buffer keeps long overview and article payloads
    // flowing on high-latency links; the OS may adjust the value
    if let Err(e) = socket.set_recv_buffer_size(RECV_BUFFER_SIZE) {
        warn!("Failed to set receive buffer size: {}", e);
    }

    // socket2's connect is blocking; run it off the async threads and flip
    // to non-blocking only after it completes
    let std_stream = timeout(
        deadline,
        tokio::task::spawn_blocking(move || -> std::io::Result<std::net::TcpStream> {
            socket.connect(&socket_addr.into())?;
            socket.set_nonblocking(true)?;
            Ok(socket.into())
        }),
    )
    .await
    .map_err(|_| NntpError::Timeout)?
    .map_err(|e| NntpError::Io(std::io::Error::other(format!("task join error: {}", e))))?
    .map_err(NntpError::Io)?;

    TcpStream::from_std(std_stream).map_err(NntpError::Io)
}
