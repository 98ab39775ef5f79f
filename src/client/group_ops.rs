//! Group selection and article navigation (RFC 3977 §6.1, §6.2.4)

use super::NntpClient;
use crate::commands::{self, ArticleRef, GroupResp, StatResp};
use crate::error::Result;
use crate::response::codes;
use tracing::debug;

impl NntpClient {
    /// Select a newsgroup.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Temporary`](crate::NntpError::Temporary) - no such
    ///   group (411)
    /// - [`NntpError::Reply`](crate::NntpError::Reply) - the reply was not
    ///   211 or its fields did not parse
    pub async fn group(&mut self, newsgroup: &str) -> Result<GroupResp> {
        debug!("Selecting newsgroup: {}", newsgroup);

        let response = self.short_command(&commands::group(newsgroup)).await?;
        Self::expect_code(&response, codes::GROUP_SELECTED)?;

        let info = commands::parse_group_response(&response)?;
        self.current_group = Some(info.name.clone());

        debug!(
            "Group {} selected: {} articles ({}-{})",
            info.name, info.count, info.first, info.last
        );
        Ok(info)
    }

    /// List article numbers in a newsgroup (RFC 3977 Section 6.1.2).
    ///
    /// With no group the currently selected one is used; an optional range
    /// limits the returned numbers. This is the one command where 211
    /// carries a multi-line payload.
    pub async fn listgroup(
        &mut self,
        newsgroup: Option<&str>,
        range: Option<&str>,
    ) -> Result<Vec<u64>> {
        let cmd = commands::listgroup(newsgroup, range);
        let response = self
            .long_command_allowing(&cmd, Some(codes::GROUP_SELECTED))
            .await?;
        Self::expect_code(&response, codes::GROUP_SELECTED)?;

        if let Some(group) = newsgroup {
            self.current_group = Some(group.to_lowercase());
        }

        let articles = response
            .lines
            .iter()
            .filter_map(|line| line.trim().parse().ok())
            .collect();
        Ok(articles)
    }

    /// Check an article's existence and make it current (RFC 3977 §6.2.4)
    pub async fn stat(&mut self, article: &ArticleRef) -> Result<StatResp> {
        let response = self.short_command(&commands::stat(article)).await?;
        Self::expect_code(&response, codes::ARTICLE_STAT)?;
        commands::parse_article_status(&response)
    }

    /// Move to the next article in the selected group (RFC 3977 §6.1.4)
    pub async fn next(&mut self) -> Result<StatResp> {
        let response = self.short_command(commands::next()).await?;
        Self::expect_code(&response, codes::ARTICLE_STAT)?;
        commands::parse_article_status(&response)
    }

    /// Move to the previous article in the selected group (RFC 3977 §6.1.3)
    pub async fn last(&mut self) -> Result<StatResp> {
        let response = self.short_command(commands::last()).await?;
        Self::expect_code(&response, codes::ARTICLE_STAT)?;
        commands::parse_article_status(&response)
    }
}
