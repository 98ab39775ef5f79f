//! OVER/XOVER and XHDR commands (RFC 3977 §8.3, §8.5, pre-standard XHDR)

use super::article::ArticleRef;
use std::fmt;

/// Article selection for OVER/XOVER/XHDR: a single reference or a number
/// range within the selected group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleRange {
    /// One article: by number, message-id, or the current article
    Article(ArticleRef),
    /// Closed range `from-to`, inclusive
    Range(u64, u64),
    /// Open range `from-`: everything from `from` to the end of the group
    From(u64),
}

impl ArticleRange {
    /// The current article of the selected group
    pub fn current() -> Self {
        ArticleRange::Article(ArticleRef::Current)
    }
}

impl From<u64> for ArticleRange {
    fn from(number: u64) -> Self {
        ArticleRange::Article(ArticleRef::Number(number))
    }
}

impl From<std::ops::RangeInclusive<u64>> for ArticleRange {
    fn from(range: std::ops::RangeInclusive<u64>) -> Self {
        ArticleRange::Range(*range.start(), *range.end())
    }
}

impl From<std::ops::RangeFrom<u64>> for ArticleRange {
    fn from(range: std::ops::RangeFrom<u64>) -> Self {
        ArticleRange::From(range.start)
    }
}

impl fmt::Display for ArticleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleRange::Article(article) => write!(f, "{}", article),
            ArticleRange::Range(from, to) => write!(f, "{}-{}", from, to),
            ArticleRange::From(from) => write!(f, "{}-", from),
        }
    }
}

/// Append an optional range to a command verb
fn with_range(verb: &str, range: &ArticleRange) -> String {
    match range {
        ArticleRange::Article(ArticleRef::Current) => format!("{}\r\n", verb),
        other => format!("{} {}\r\n", verb, other),
    }
}

/// Build OVER command (RFC 3977 §8.3)
pub fn over(range: &ArticleRange) -> String {
    with_range("OVER", range)
}

/// Build XOVER command (pre-standard spelling of OVER)
pub fn xover(range: &ArticleRange) -> String {
    with_range("XOVER", range)
}

/// Build XHDR command
///
/// Pre-standard header digest: one `number value` line per article for the
/// named header.
pub fn xhdr(header: &str, range: &ArticleRange) -> String {
    match range {
        ArticleRange::Article(ArticleRef::Current) => format!("XHDR {}\r\n", header),
        other => format!("XHDR {} {}\r\n", header, other),
    }
}

/// One line of an XHDR response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XhdrEntry {
    /// Article number, or None when the line did not follow the
    /// `number value` shape
    pub article_number: Option<u64>,
    /// Header value; for malformed lines, the whole raw line
    pub value: String,
}

/// Parse one XHDR payload line. Malformed lines are kept raw rather than
/// dropped, so callers see everything the server said.
pub fn parse_xhdr_line(line: &str) -> XhdrEntry {
    let mut parts = line.splitn(2, ' ');
    let number = parts.next().and_then(|n| n.parse().ok());

    match (number, parts.next()) {
        (Some(article_number), Some(value)) => XhdrEntry {
            article_number: Some(article_number),
            value: value.to_string(),
        },
        _ => XhdrEntry {
            article_number: None,
            value: line.to_string(),
        },
    }
}
