//! Newsgroup listing and discovery commands (RFC 3977 §7.3, §7.4, §7.6)

use super::NntpClient;
use crate::commands::{self, ActiveGroup, NewsgroupInfo};
use crate::datetime;
use crate::error::Result;
use crate::response::codes;
use chrono::NaiveDateTime;
use tracing::debug;

impl NntpClient {
    /// List active newsgroups (RFC 3977 Section 7.6.3).
    ///
    /// Without a pattern this sends the bare LIST command; with one it
    /// sends LIST ACTIVE. Either way the payload is `group high low status`
    /// per line.
    pub async fn list_active(&mut self, wildmat: Option<&str>) -> Result<Vec<ActiveGroup>> {
        let response = self.long_command(&commands::list_active(wildmat)).await?;
        Self::expect_code(&response, codes::LIST_INFORMATION_FOLLOWS)?;

        let groups = commands::parse_active_list(&response.lines);
        debug!("Retrieved {} active groups", groups.len());
        Ok(groups)
    }

    /// List newsgroups with descriptions (RFC 3977 Section 7.6.6).
    pub async fn list_newsgroups(&mut self, wildmat: &str) -> Result<Vec<NewsgroupInfo>> {
        let response = self
            .long_command(&commands::list_newsgroups(wildmat))
            .await?;
        Self::expect_code(&response, codes::LIST_INFORMATION_FOLLOWS)?;

        let groups = commands::parse_newsgroups_list(&response.lines);
        debug!("Retrieved {} newsgroup descriptions", groups.len());
        Ok(groups)
    }

    /// List newsgroup descriptions via the pre-standard XGTITLE command.
    ///
    /// Same payload shape as LIST NEWSGROUPS under a 282 reply. Prefer
    /// [`list_newsgroups`](Self::list_newsgroups) on RFC 3977 servers.
    pub async fn xgtitle(&mut self, wildmat: &str) -> Result<Vec<NewsgroupInfo>> {
        let response = self.long_command(&commands::xgtitle(wildmat)).await?;
        Self::expect_code(&response, codes::XGTITLE_LIST_FOLLOWS)?;
        Ok(commands::parse_newsgroups_list(&response.lines))
    }

    /// List newsgroups created since `since` (RFC 3977 Section 7.3).
    ///
    /// The stamp is sent as `YYYYMMDD HHMMSS GMT` with a four-digit year.
    pub async fn newgroups(&mut self, since: &NaiveDateTime) -> Result<Vec<ActiveGroup>> {
        let cmd = commands::newgroups(
            &datetime::format_date(since),
            &datetime::format_time(since),
        );
        let response = self.long_command(&cmd).await?;
        Self::expect_code(&response, codes::NEW_NEWSGROUPS_FOLLOW)?;

        let groups = commands::parse_active_list(&response.lines);
        debug!("{} newsgroups created since {}", groups.len(), since);
        Ok(groups)
    }

    /// List message-ids of articles arrived in matching groups since
    /// `since` (RFC 3977 Section 7.4).
    pub async fn newnews(&mut self, wildmat: &str, since: &NaiveDateTime) -> Result<Vec<String>> {
        let cmd = commands::newnews(
            wildmat,
            &datetime::format_date(since),
            &datetime::format_time(since),
        );
        let response = self.long_command(&cmd).await?;
        Self::expect_code(&response, codes::NEW_ARTICLE_LIST_FOLLOWS)?;

        let ids = response
            .lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(ids)
    }
}
