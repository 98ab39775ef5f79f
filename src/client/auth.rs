//! AUTHINFO USER/PASS authentication (RFC 4643 §2.3)

use super::NntpClient;
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::codes;
use tracing::debug;

impl NntpClient {
    /// Authenticate with username and optional password.
    ///
    /// Sends AUTHINFO USER; when the server answers 381 the password is
    /// required and AUTHINFO PASS follows. Some servers accept the username
    /// alone with an immediate 281.
    ///
    /// On success the capability cache is invalidated and reloaded before
    /// this method returns, and a MODE READER switch deferred at connect
    /// time (480) is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::AlreadyLoggedIn`] - the session is already authenticated
    /// - [`NntpError::Reply`] - 381 was received but no password was supplied,
    ///   or the USER reply was outside the expected set
    /// - [`NntpError::Permanent`] - AUTHINFO PASS was not answered with 281
    /// - [`NntpError::Timeout`] - the server did not respond in time
    pub async fn login(&mut self, username: &str, password: Option<&str>) -> Result<()> {
        if self.authenticated {
            return Err(NntpError::AlreadyLoggedIn);
        }
        debug!("Authenticating as {}", username);

        let response = self
            .short_command(&commands::authinfo_user(username))
            .await?;

        match response.code {
            codes::AUTH_ACCEPTED => {
                debug!("Authenticated without password");
            }
            codes::AUTH_CONTINUE => {
                let Some(password) = password else {
                    return Err(NntpError::Reply(response.raw_status()));
                };

                // The PASS reply is 281 or a refusal; a refusal here is
                // final whatever its status class
                let response = match self.short_command(&commands::authinfo_pass(password)).await {
                    Ok(response) => response,
                    Err(NntpError::Temporary { code, message }) => {
                        return Err(NntpError::Permanent { code, message });
                    }
                    Err(err) => return Err(err),
                };
                if response.code != codes::AUTH_ACCEPTED {
                    return Err(NntpError::Permanent {
                        code: response.code,
                        message: response.message,
                    });
                }
            }
            _ => return Err(NntpError::Reply(response.raw_status())),
        }

        self.authenticated = true;
        debug!("Authentication successful");

        // The server may advertise a different feature set now; the reload
        // completes before login returns
        self.capabilities = None;
        self.load_capabilities().await?;

        if self.readermode_after_auth {
            let has_reader = self
                .capabilities
                .as_ref()
                .is_some_and(|caps| caps.has("READER"));
            if has_reader {
                self.readermode_after_auth = false;
            } else {
                self.try_mode_reader().await?;
            }
        }

        Ok(())
    }
}
