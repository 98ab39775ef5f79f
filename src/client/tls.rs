//! STARTTLS in-band transport upgrade (RFC 4642)

use super::NntpClient;
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::codes;
use tracing::debug;

impl NntpClient {
    /// Upgrade the established connection to TLS.
    ///
    /// Sends STARTTLS and, on 382, wraps the byte stream in a TLS session.
    /// The upgrade happens at a synchronized point: the 382 line has been
    /// consumed and nothing else may sit in the read-ahead buffer, so no
    /// plaintext byte is ever interpreted as TLS data. On success the
    /// capability cache is invalidated and reloaded (the server typically
    /// stops advertising STARTTLS).
    ///
    /// Servers may refuse TLS after authentication; the upgrade is only
    /// allowed on a fresh, unauthenticated session.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::TlsAlreadyEnabled`] - the stream is already TLS
    /// - [`NntpError::TlsForbiddenAfterAuth`] - the session has authenticated
    /// - [`NntpError::Reply`] - the server answered something other than 382
    ///   (the transport is left untouched)
    /// - [`NntpError::Tls`] / [`NntpError::Protocol`] - the handshake failed
    ///   or plaintext crossed the upgrade boundary; the session is
    ///   disconnected, a partial upgrade is not recoverable
    pub async fn starttls(&mut self) -> Result<()> {
        if self.tls_on {
            return Err(NntpError::TlsAlreadyEnabled);
        }
        if self.authenticated {
            return Err(NntpError::TlsForbiddenAfterAuth);
        }

        let response = self.short_command(commands::starttls()).await?;
        Self::expect_code(&response, codes::CONTINUE_TLS)?;

        // Past this point the transport is consumed; any failure leaves the
        // session disconnected
        let transport = self.transport.take().ok_or(NntpError::NotConnected)?;
        let upgraded = transport
            .upgrade_to_tls(&self.config.host, self.config.timeout, &self.config.trust)
            .await?;

        self.transport = Some(upgraded);
        self.tls_on = true;
        debug!("TLS established with {}", self.config.host);

        self.capabilities = None;
        self.load_capabilities().await
    }
}
