//! NNTP client session
//!
//! The session is single-owner: every command takes `&mut self`, so exactly
//! one command is in flight at a time and wire traffic follows call order.
//! A command interrupted mid-response (cancellation, timeout, framing error)
//! leaves the wire unsynchronizable; the session drops its transport and
//! subsequent commands fail with [`NntpError::NotConnected`].

mod articles;
mod auth;
mod connection;
mod group_ops;
mod io;
mod listing;
mod metadata;
mod posting;
mod tls;

pub use articles::{ArticleResp, BodyResp, HeadResp};

use crate::capabilities::Capabilities;
use crate::config::ClientConfig;
use crate::error::{NntpError, Result};
use crate::overview::OverviewFormat;
use crate::transport::Transport;
use std::sync::Arc;
use tracing::debug;

/// Decoder applied to extended overview header values. The default is the
/// identity function; callers wanting RFC 2047 decoding plug in their own.
pub type HeaderDecoder = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Async NNTP client session
///
/// # Example
///
/// ```no_run
/// use nntp_client::{ClientConfig, NntpClient};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::tls("news.example.com").with_reader_mode();
/// let mut client = NntpClient::connect(Arc::new(config)).await?;
/// client.login("user", Some("pass")).await?;
///
/// let info = client.group("misc.test").await?;
/// println!("{} has {} articles", info.name, info.count);
///
/// client.quit().await?;
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct NntpClient {
    /// Byte transport; None once the session is closed or broken
    transport: Option<Transport>,
    /// Connection configuration
    config: Arc<ClientConfig>,
    /// Welcome banner captured at connect
    banner: String,
    /// Whether the banner (or a later MODE READER reply) allowed posting
    posting_allowed: bool,
    /// Capability cache; None when invalidated and not yet reloaded
    capabilities: Option<Capabilities>,
    /// Overview format negotiated on first OVER/XOVER use
    overview_fmt: Option<OverviewFormat>,
    /// Decoder for extended overview header values
    header_decoder: HeaderDecoder,
    /// All traffic travels through TLS
    tls_on: bool,
    /// AUTHINFO exchange completed with 281
    authenticated: bool,
    /// MODE READER was answered 480 at connect; retry after login
    readermode_after_auth: bool,
    /// Currently selected newsgroup
    current_group: Option<String>,
}

impl std::fmt::Debug for NntpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NntpClient")
            .field("transport", &self.transport.is_some())
            .field("config", &self.config)
            .field("banner", &self.banner)
            .field("posting_allowed", &self.posting_allowed)
            .field("capabilities", &self.capabilities)
            .field("overview_fmt", &self.overview_fmt)
            .field("tls_on", &self.tls_on)
            .field("authenticated", &self.authenticated)
            .field("readermode_after_auth", &self.readermode_after_auth)
            .field("current_group", &self.current_group)
            .finish()
    }
}

impl NntpClient {
    /// Welcome banner captured at connect
    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Whether the server offered posting (banner 200 / MODE READER 200)
    pub fn posting_allowed(&self) -> bool {
        self.posting_allowed
    }

    /// Whether the transport is currently usable
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Whether the byte stream is TLS-wrapped
    pub fn is_tls(&self) -> bool {
        self.tls_on
    }

    /// Whether an AUTHINFO exchange completed successfully
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Currently selected newsgroup, if any
    pub fn current_group(&self) -> Option<&str> {
        self.current_group.as_deref()
    }

    /// Cached capability map; None when it has been invalidated and no
    /// reload has happened yet
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.capabilities.as_ref()
    }

    /// Protocol version advertised via CAPABILITIES (1 when absent)
    pub fn nntp_version(&self) -> u32 {
        self.capabilities
            .as_ref()
            .map(Capabilities::version)
            .unwrap_or(1)
    }

    /// Server software identification, when advertised
    pub fn nntp_implementation(&self) -> Option<String> {
        self.capabilities
            .as_ref()
            .and_then(Capabilities::implementation)
    }

    /// Replace the decoder applied to extended overview header values
    /// (e.g. with an RFC 2047 encoded-words decoder)
    pub fn set_header_decoder(&mut self, decoder: impl Fn(&str) -> String + Send + Sync + 'static) {
        self.header_decoder = Box::new(decoder);
    }

    /// Close the transport without the QUIT exchange. Idempotent; dropping
    /// the session has the same effect.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            debug!("Connection to {} closed", self.config.host);
        }
    }

    /// Access the transport, failing when the session is closed or broken
    pub(super) fn transport(&mut self) -> Result<&mut Transport> {
        self.transport.as_mut().ok_or(NntpError::NotConnected)
    }

    /// Drop the transport after an unrecoverable wire error
    pub(super) fn mark_broken(&mut self) {
        if self.transport.take().is_some() {
            debug!("Session marked unusable after wire error");
        }
    }
}

impl Drop for NntpClient {
    fn drop(&mut self) {
        debug!("NntpClient dropped");
    }
}
