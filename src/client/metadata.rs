//! Article metadata and server queries: OVER/XOVER, XHDR, DATE, HELP, SLAVE
//!
//! Overview retrieval negotiates the column layout once per session via
//! LIST OVERVIEW.FMT and parses every subsequent OVER/XOVER payload against
//! the cached descriptor.

use super::NntpClient;
use crate::commands::{self, ArticleRange, XhdrEntry};
use crate::datetime;
use crate::error::Result;
use crate::overview::{parse_overview_line, OverviewEntry, OverviewFormat};
use crate::response::codes;
use chrono::NaiveDateTime;
use tracing::{debug, trace, warn};

impl NntpClient {
    /// The overview column layout for this session, negotiating it on
    /// first use.
    ///
    /// A server that cannot answer LIST OVERVIEW.FMT (or answers with a
    /// non-215 reply) gets the RFC default layout; a reply that fails
    /// validation is a data error. The cache survives STARTTLS and login,
    /// since the wire semantics of overview fields do not change.
    pub async fn overview_format(&mut self) -> Result<OverviewFormat> {
        if let Some(format) = &self.overview_fmt {
            return Ok(format.clone());
        }

        let format = match self.long_command(commands::list_overview_fmt()).await {
            Ok(response) if response.code == codes::LIST_INFORMATION_FOLLOWS => {
                OverviewFormat::parse(&response.lines)?
            }
            Ok(response) => {
                warn!(
                    "LIST OVERVIEW.FMT answered {}, using default layout",
                    response.code
                );
                OverviewFormat::default_format()
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                debug!("LIST OVERVIEW.FMT failed ({}), using default layout", err);
                OverviewFormat::default_format()
            }
        };

        self.overview_fmt = Some(format.clone());
        Ok(format)
    }

    /// Fetch overview records for a range of articles (RFC 3977 §8.3).
    ///
    /// Uses OVER when the server advertises the capability and falls back
    /// to the pre-standard XOVER otherwise. Records parse against the
    /// session's negotiated column layout; the header decoder hook applies
    /// to extended columns.
    pub async fn over(&mut self, range: &ArticleRange) -> Result<Vec<OverviewEntry>> {
        let format = self.overview_format().await?;

        let use_over = self
            .capabilities
            .as_ref()
            .is_some_and(|caps| caps.has("OVER"));
        let cmd = if use_over {
            commands::over(range)
        } else {
            trace!("OVER not advertised, falling back to XOVER");
            commands::xover(range)
        };

        let response = self.long_command(&cmd).await?;
        Self::expect_code(&response, codes::OVERVIEW_INFO_FOLLOWS)?;

        let mut entries = Vec::with_capacity(response.lines.len());
        for line in &response.lines {
            if let Some(entry) = parse_overview_line(&format, line, &*self.header_decoder)? {
                entries.push(entry);
            }
        }

        debug!("Parsed {} overview records", entries.len());
        Ok(entries)
    }

    /// Fetch one header across a range of articles via the pre-standard
    /// XHDR command.
    ///
    /// Each payload line is `number value`; lines that do not follow that
    /// shape are kept raw rather than dropped.
    pub async fn xhdr(&mut self, header: &str, range: &ArticleRange) -> Result<Vec<XhdrEntry>> {
        let response = self.long_command(&commands::xhdr(header, range)).await?;
        Self::expect_code(&response, codes::HEAD_FOLLOWS)?;

        Ok(response
            .lines
            .iter()
            .map(|line| commands::parse_xhdr_line(line))
            .collect())
    }

    /// Ask for the server's clock (RFC 3977 Section 7.1).
    ///
    /// The reply must be `111` with exactly fourteen digits; anything else
    /// is a data error, which leaves the session usable.
    pub async fn date(&mut self) -> Result<NaiveDateTime> {
        let response = self.short_command(commands::date()).await?;
        Self::expect_code(&response, codes::SERVER_DATE)?;
        datetime::parse_timestamp(response.message.trim_end())
    }

    /// Fetch the server's help text (RFC 3977 Section 7.2).
    pub async fn help(&mut self) -> Result<Vec<String>> {
        let response = self.long_command(commands::help()).await?;
        Self::expect_code(&response, codes::HELP_TEXT_FOLLOWS)?;
        Ok(response.lines)
    }

    /// Mark this connection as coming from a slave server (RFC 977 §3.12).
    ///
    /// Kept for compatibility with ancient peers; servers answer 202 and
    /// otherwise ignore it.
    pub async fn slave(&mut self) -> Result<()> {
        let response = self.short_command(commands::slave()).await?;
        Self::expect_code(&response, codes::SLAVE_STATUS_NOTED)?;
        Ok(())
    }

    /// Forget the negotiated overview layout, forcing renegotiation on the
    /// next OVER/XOVER.
    pub fn invalidate_overview_format(&mut self) {
        self.overview_fmt = None;
    }
}
