//! Group selection and newsgroup discovery commands (RFC 3977 §6.1, §7.3, §7.4)

use crate::error::{NntpError, Result};
use crate::response::Response;

/// Build GROUP command
pub fn group(newsgroup: &str) -> String {
    format!("GROUP {}\r\n", newsgroup)
}

/// Build LISTGROUP command (RFC 3977 §6.1.2)
///
/// Lists article numbers in a group; the reply is 211 followed by a
/// multi-line payload, the one context where 211 is a long response.
pub fn listgroup(newsgroup: Option<&str>, range: Option<&str>) -> String {
    match (newsgroup, range) {
        (Some(g), Some(r)) => format!("LISTGROUP {} {}\r\n", g, r),
        (Some(g), None) => format!("LISTGROUP {}\r\n", g),
        (None, _) => "LISTGROUP\r\n".to_string(),
    }
}

/// Build NEWGROUPS command (RFC 3977 §7.3)
///
/// Lists newsgroups created since the given `YYYYMMDD HHMMSS` stamp.
pub fn newgroups(date: &str, time: &str) -> String {
    format!("NEWGROUPS {} {} GMT\r\n", date, time)
}

/// Build NEWNEWS command (RFC 3977 §7.4)
///
/// Lists message-ids of articles arrived in matching groups since the
/// given stamp.
pub fn newnews(wildmat: &str, date: &str, time: &str) -> String {
    format!("NEWNEWS {} {} {} GMT\r\n", wildmat, date, time)
}

/// Group status returned by the GROUP command (211)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResp {
    /// Raw status line as received
    pub raw: String,
    /// Estimated number of articles in the group
    pub count: u64,
    /// Number of the first article
    pub first: u64,
    /// Number of the last article
    pub last: u64,
    /// Group name, lowercased for consistency
    pub name: String,
}

/// Parse GROUP response: "211 count first last group-name"
pub fn parse_group_response(response: &Response) -> Result<GroupResp> {
    let parts: Vec<&str> = response.message.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(NntpError::Reply(response.raw_status()));
    }

    let numbers: Vec<u64> = parts[..3]
        .iter()
        .map(|p| p.parse())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| NntpError::Reply(response.raw_status()))?;

    Ok(GroupResp {
        raw: response.raw_status(),
        count: numbers[0],
        first: numbers[1],
        last: numbers[2],
        name: parts[3].to_lowercase(),
    })
}

/// Active newsgroup entry from LIST ACTIVE and NEWGROUPS payloads
/// (RFC 3977 §7.6.3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGroup {
    /// Newsgroup name
    pub name: String,
    /// Highest article number
    pub high: u64,
    /// Lowest article number
    pub low: u64,
    /// Posting status: "y", "n", "m", or an "=group" alias
    pub status: String,
}

/// Parse a LIST ACTIVE / NEWGROUPS payload: "group high low status" per
/// line. Malformed lines are skipped.
pub fn parse_active_list(lines: &[String]) -> Vec<ActiveGroup> {
    let mut groups = Vec::with_capacity(lines.len());
    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }

        let (Ok(high), Ok(low)) = (parts[1].parse(), parts[2].parse()) else {
            continue;
        };

        groups.push(ActiveGroup {
            name: parts[0].to_string(),
            high,
            low,
            status: parts[3].to_string(),
        });
    }
    groups
}
