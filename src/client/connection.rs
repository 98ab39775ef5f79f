//! Connection lifecycle: connect, banner validation, capability loading,
//! reader mode, and teardown

use super::NntpClient;
use crate::capabilities::Capabilities;
use crate::commands;
use crate::config::{ClientConfig, TlsMode};
use crate::error::{NntpError, Result};
use crate::response::codes;
use crate::transport::Transport;
use std::sync::Arc;
use tracing::{debug, warn};

impl NntpClient {
    /// Connect to the configured server.
    ///
    /// Opens the transport (with an immediate TLS handshake for
    /// [`TlsMode::Implicit`]), validates the welcome banner, loads the
    /// capability cache, applies the STARTTLS policy, and switches to
    /// reader mode when requested. The session only exists once the banner
    /// has been read and accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Io`] / [`NntpError::Tls`] - connection or handshake failed
    /// - [`NntpError::Timeout`] - connect or greeting exceeded the deadline
    /// - [`NntpError::Temporary`] / [`NntpError::Permanent`] - the server
    ///   refused the connection (e.g. 400 service unavailable)
    /// - [`NntpError::Reply`] - the greeting was not 200 or 201
    pub async fn connect(config: Arc<ClientConfig>) -> Result<Self> {
        let transport = match config.tls_mode {
            TlsMode::Implicit => {
                Transport::connect_tls(&config.host, config.port, config.timeout, &config.trust)
                    .await?
            }
            _ => Transport::connect(&config.host, config.port, config.timeout).await?,
        };
        let tls_on = transport.is_tls();

        let mut client = Self {
            transport: Some(transport),
            config,
            banner: String::new(),
            posting_allowed: false,
            capabilities: None,
            overview_fmt: None,
            header_decoder: Box::new(|raw| raw.to_string()),
            tls_on,
            authenticated: false,
            readermode_after_auth: false,
            current_group: None,
        };

        let greeting = client.read_status().await?;
        debug!("Server greeting: {}", greeting.raw_status());
        match greeting.code {
            codes::READY_POSTING_ALLOWED => client.posting_allowed = true,
            codes::READY_NO_POSTING => client.posting_allowed = false,
            _ => return Err(NntpError::Reply(greeting.raw_status())),
        }
        client.banner = greeting.raw_status();

        client.load_capabilities().await?;

        match client.config.tls_mode {
            TlsMode::StartTlsRequired => client.starttls().await?,
            TlsMode::StartTlsOpportunistic => {
                let advertised = client
                    .capabilities
                    .as_ref()
                    .is_some_and(|caps| caps.has("STARTTLS"));
                if advertised {
                    client.starttls().await?;
                } else {
                    debug!("STARTTLS not advertised, continuing in plaintext");
                }
            }
            TlsMode::None | TlsMode::Implicit => {}
        }

        if client.config.reader_mode {
            let has_reader = client
                .capabilities
                .as_ref()
                .is_some_and(|caps| caps.has("READER"));
            if !has_reader {
                client.try_mode_reader().await?;
            }
        }

        Ok(client)
    }

    /// Reload the capability cache from the wire.
    ///
    /// Pre-RFC 3977 servers answer CAPABILITIES with a 5xx; those get an
    /// empty capability map rather than a failed session.
    pub(super) async fn load_capabilities(&mut self) -> Result<()> {
        match self.long_command(commands::capabilities()).await {
            Ok(response) => {
                Self::expect_code(&response, codes::CAPABILITY_LIST)?;
                let caps = Capabilities::parse(&response.lines);
                debug!("Server advertises {} capabilities", caps.list().len());
                self.capabilities = Some(caps);
                Ok(())
            }
            Err(NntpError::Permanent { code, message }) => {
                warn!("CAPABILITIES not supported ({} {})", code, message);
                self.capabilities = Some(Capabilities::new());
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Invalidate the capability cache and reload it from the wire
    pub async fn refresh_capabilities(&mut self) -> Result<&Capabilities> {
        self.capabilities = None;
        self.load_capabilities().await?;
        // load_capabilities stores a map on every Ok path
        self.capabilities.as_ref().ok_or(NntpError::NotConnected)
    }

    /// Send MODE READER and apply the reply.
    ///
    /// 480 means the server wants authentication first; the switch is
    /// deferred until after login rather than failing the connect.
    pub(super) async fn try_mode_reader(&mut self) -> Result<()> {
        match self.short_command(commands::mode_reader()).await {
            Ok(response) => {
                match response.code {
                    codes::READY_POSTING_ALLOWED => self.posting_allowed = true,
                    codes::READY_NO_POSTING => self.posting_allowed = false,
                    _ => return Err(NntpError::Reply(response.raw_status())),
                }
                debug!("Reader mode enabled (posting: {})", self.posting_allowed);
                self.readermode_after_auth = false;
                self.capabilities = None;
                self.load_capabilities().await
            }
            Err(NntpError::Temporary {
                code: codes::AUTH_REQUIRED,
                ..
            }) => {
                debug!("MODE READER deferred until after authentication");
                self.readermode_after_auth = true;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Close the session gracefully (RFC 3977 Section 5.4).
    ///
    /// Sends QUIT and reads the goodbye, then closes the transport. Errors
    /// on the way out are suppressed: the transport is closed regardless of
    /// what the server said, and a second call is a no-op.
    pub async fn quit(&mut self) -> Result<()> {
        if self.transport.is_none() {
            return Ok(());
        }

        if let Err(err) = self.short_command(commands::quit()).await {
            debug!("QUIT exchange failed: {}", err);
        }
        self.close();
        Ok(())
    }
}
