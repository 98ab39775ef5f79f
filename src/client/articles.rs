//! Article retrieval (RFC 3977 §6.2)
//!
//! ARTICLE, HEAD, and BODY share the 22x status shape (article number and
//! message-id) and differ in their payload. ARTICLE payloads split at the
//! first blank line into headers and body.

use super::NntpClient;
use crate::article::{split_article, Headers};
use crate::commands::{self, ArticleRef, StatResp};
use crate::error::{NntpError, Result};
use crate::response::{codes, is_long_response};
use tokio::io::AsyncWrite;
use tracing::trace;

/// Full article: parsed headers plus body lines (220)
#[derive(Debug, Clone)]
pub struct ArticleResp {
    /// Raw status line as received
    pub raw: String,
    /// Article number (0 when requested by message-id)
    pub article_number: u64,
    /// Message identifier
    pub message_id: String,
    /// Headers in wire order
    pub headers: Headers,
    /// Body lines, dot-unstuffed
    pub body: Vec<String>,
}

/// Article headers only (221)
#[derive(Debug, Clone)]
pub struct HeadResp {
    /// Raw status line as received
    pub raw: String,
    /// Article number (0 when requested by message-id)
    pub article_number: u64,
    /// Message identifier
    pub message_id: String,
    /// Headers in wire order
    pub headers: Headers,
}

/// Article body only (222)
#[derive(Debug, Clone)]
pub struct BodyResp {
    /// Raw status line as received
    pub raw: String,
    /// Article number (0 when requested by message-id)
    pub article_number: u64,
    /// Message identifier
    pub message_id: String,
    /// Body lines, dot-unstuffed
    pub lines: Vec<String>,
}

impl NntpClient {
    /// Fetch a full article (headers and body).
    pub async fn article(&mut self, article: &ArticleRef) -> Result<ArticleResp> {
        trace!("Fetching article {}", article);

        let response = self.long_command(&commands::article(article)).await?;
        Self::expect_code(&response, codes::ARTICLE_FOLLOWS)?;
        let stat = commands::parse_article_status(&response)?;

        let (head, body) = split_article(&response.lines);
        Ok(ArticleResp {
            raw: stat.raw,
            article_number: stat.article_number,
            message_id: stat.message_id,
            headers: Headers::parse(head),
            body: body.to_vec(),
        })
    }

    /// Fetch article headers only.
    pub async fn head(&mut self, article: &ArticleRef) -> Result<HeadResp> {
        trace!("Fetching head {}", article);

        let response = self.long_command(&commands::head(article)).await?;
        Self::expect_code(&response, codes::HEAD_FOLLOWS)?;
        let stat = commands::parse_article_status(&response)?;

        Ok(HeadResp {
            raw: stat.raw,
            article_number: stat.article_number,
            message_id: stat.message_id,
            headers: Headers::parse(&response.lines),
        })
    }

    /// Fetch an article body only.
    pub async fn body(&mut self, article: &ArticleRef) -> Result<BodyResp> {
        trace!("Fetching body {}", article);

        let response = self.long_command(&commands::body(article)).await?;
        Self::expect_code(&response, codes::BODY_FOLLOWS)?;
        let stat = commands::parse_article_status(&response)?;

        Ok(BodyResp {
            raw: stat.raw,
            article_number: stat.article_number,
            message_id: stat.message_id,
            lines: response.lines,
        })
    }

    /// Stream an article body into `sink` instead of collecting lines.
    ///
    /// Each body line is written dot-unstuffed with a CRLF terminator.
    /// Useful for large binaries where per-line `String` allocation hurts.
    pub async fn body_into<W>(&mut self, article: &ArticleRef, sink: &mut W) -> Result<StatResp>
    where
        W: AsyncWrite + Unpin,
    {
        trace!("Streaming body {}", article);

        self.send_command(&commands::body(article)).await?;
        let response = self.read_status().await?;
        if response.code != codes::BODY_FOLLOWS {
            // Drain an unexpected long payload so the wire stays in sync
            if is_long_response(response.code) {
                let mut discard = tokio::io::sink();
                let _ = self.read_payload_into(&mut discard).await;
            }
            return Err(NntpError::Reply(response.raw_status()));
        }
        let stat = commands::parse_article_status(&response)?;

        let lines = self.read_payload_into(sink).await?;
        trace!("Streamed {} body lines", lines);
        Ok(stat)
    }
}
