//! Article submission: POST and IHAVE (RFC 3977 §6.3)

use super::NntpClient;
use crate::article::stuff_for_transmission;
use crate::commands;
use crate::error::Result;
use crate::response::codes;
use tracing::debug;

impl NntpClient {
    /// Post a new article (RFC 3977 Section 6.3.1).
    ///
    /// `article` is the complete article text (headers, blank line, body)
    /// with any line-ending convention; it is normalized to CRLF and
    /// dot-stuffed on the way out, then terminated with a lone `.` line.
    ///
    /// # Two-phase protocol
    ///
    /// 1. POST → 340 (send the article) or 440 (posting not permitted)
    /// 2. article text + `.\r\n` → 240 (accepted) or 441 (rejected)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Temporary`](crate::NntpError::Temporary) - posting not
    ///   permitted (440) or the article was rejected (441)
    /// - [`NntpError::Reply`](crate::NntpError::Reply) - an unexpected
    ///   status arrived where 340 or 240 was required
    pub async fn post(&mut self, article: &str) -> Result<()> {
        debug!("Posting article");

        let response = self.short_command(commands::post()).await?;
        Self::expect_code(&response, codes::SEND_ARTICLE)?;

        self.send_raw(stuff_for_transmission(article).as_bytes())
            .await?;
        self.send_raw(b".\r\n").await?;

        let response = self.read_status().await?;
        Self::expect_code(&response, codes::ARTICLE_POSTED)?;

        debug!("Article posted successfully");
        Ok(())
    }

    /// Offer an article to the server by message-id (RFC 3977 Section 6.3.2).
    ///
    /// IHAVE is the server-to-server transfer path: the peer decides from
    /// the message-id whether it wants the article at all.
    ///
    /// # Two-phase protocol
    ///
    /// 1. IHAVE → 335 (send it), 435 (not wanted), 436 (try later)
    /// 2. article text + `.\r\n` → 235 (transferred), 436/437 (failed)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Temporary`](crate::NntpError::Temporary) - the article
    ///   was not wanted (435), the transfer is not possible right now (436),
    ///   or it was rejected (437)
    /// - [`NntpError::Reply`](crate::NntpError::Reply) - an unexpected
    ///   status arrived where 335 or 235 was required
    pub async fn ihave(&mut self, message_id: &str, article: &str) -> Result<()> {
        debug!("IHAVE: offering article {}", message_id);

        let response = self.short_command(&commands::ihave(message_id)).await?;
        Self::expect_code(&response, codes::SEND_ARTICLE_TRANSFER)?;

        self.send_raw(stuff_for_transmission(article).as_bytes())
            .await?;
        self.send_raw(b".\r\n").await?;

        let response = self.read_status().await?;
        Self::expect_code(&response, codes::ARTICLE_TRANSFERRED)?;

        debug!("Article {} transferred", message_id);
        Ok(())
    }
}
