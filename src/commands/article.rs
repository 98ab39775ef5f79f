//! Article retrieval and navigation commands (RFC 3977 §6)

use crate::error::{NntpError, Result};
use crate::response::Response;
use std::fmt;

/// How a command addresses an article: by number within the selected group,
/// by globally unique message-id, or the group's current article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleRef {
    /// Article number in the currently selected newsgroup
    Number(u64),
    /// Message-id in angle brackets, e.g. `<abc@example>`
    MessageId(String),
    /// The current article of the selected newsgroup
    Current,
}

impl ArticleRef {
    /// Message-id constructor that adds the angle brackets when missing
    pub fn message_id(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.starts_with('<') {
            ArticleRef::MessageId(id)
        } else {
            ArticleRef::MessageId(format!("<{}>", id))
        }
    }
}

impl From<u64> for ArticleRef {
    fn from(number: u64) -> Self {
        ArticleRef::Number(number)
    }
}

impl From<&str> for ArticleRef {
    fn from(id: &str) -> Self {
        ArticleRef::message_id(id)
    }
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleRef::Number(n) => write!(f, "{}", n),
            ArticleRef::MessageId(id) => f.write_str(id),
            ArticleRef::Current => Ok(()),
        }
    }
}

/// Append an optional article reference to a command verb
fn with_ref(verb: &str, article: &ArticleRef) -> String {
    match article {
        ArticleRef::Current => format!("{}\r\n", verb),
        other => format!("{} {}\r\n", verb, other),
    }
}

/// Build ARTICLE command
pub fn article(article: &ArticleRef) -> String {
    with_ref("ARTICLE", article)
}

/// Build HEAD command
pub fn head(article: &ArticleRef) -> String {
    with_ref("HEAD", article)
}

/// Build BODY command
pub fn body(article: &ArticleRef) -> String {
    with_ref("BODY", article)
}

/// Build STAT command (RFC 3977 §6.2.4)
///
/// Checks article existence and sets the current article without
/// retrieving content.
pub fn stat(article: &ArticleRef) -> String {
    with_ref("STAT", article)
}

/// Build NEXT command (RFC 3977 §6.1.4)
pub fn next() -> &'static str {
    "NEXT\r\n"
}

/// Build LAST command (RFC 3977 §6.1.3)
pub fn last() -> &'static str {
    "LAST\r\n"
}

/// Article position returned by STAT, NEXT, and LAST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatResp {
    /// Raw status line as received
    pub raw: String,
    /// Article number (0 when the request used a message-id and the server
    /// has no number for it)
    pub article_number: u64,
    /// Message identifier, e.g. `<abc@example>`
    pub message_id: String,
}

/// Parse the `n message-id` tokens shared by the 22x status lines.
pub fn parse_article_status(response: &Response) -> Result<StatResp> {
    let parts: Vec<&str> = response.message.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(NntpError::Reply(response.raw_status()));
    }

    let article_number = parts[0]
        .parse()
        .map_err(|_| NntpError::Reply(response.raw_status()))?;

    Ok(StatResp {
        raw: response.raw_status(),
        article_number,
        message_id: parts[1].to_string(),
    })
}
