//! LIST variants and the XGTITLE extension (RFC 3977 §7.6)

/// Build the active-list command: bare `LIST` for everything, or
/// `LIST ACTIVE` with a wildmat pattern
pub fn list_active(wildmat: Option<&str>) -> String {
    match wildmat {
        Some(pattern) => format!("LIST ACTIVE {}\r\n", pattern),
        None => "LIST\r\n".to_string(),
    }
}

/// Build LIST NEWSGROUPS command (RFC 3977 §7.6.6)
///
/// Returns newsgroup names with their one-line descriptions.
pub fn list_newsgroups(wildmat: &str) -> String {
    format!("LIST NEWSGROUPS {}\r\n", wildmat)
}

/// Build LIST OVERVIEW.FMT command (RFC 3977 §8.4)
pub fn list_overview_fmt() -> &'static str {
    "LIST OVERVIEW.FMT\r\n"
}

/// Build XGTITLE command
///
/// Pre-standard equivalent of LIST NEWSGROUPS, still offered by some
/// servers. Reply is 282 with the same payload shape.
pub fn xgtitle(wildmat: &str) -> String {
    format!("XGTITLE {}\r\n", wildmat)
}

/// Newsgroup name and description from LIST NEWSGROUPS or XGTITLE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsgroupInfo {
    /// Newsgroup name
    pub name: String,
    /// Human-readable description, empty when the server has none
    pub description: String,
}

/// Parse a LIST NEWSGROUPS / XGTITLE payload: name and description
/// separated by whitespace, one group per line.
pub fn parse_newsgroups_list(lines: &[String]) -> Vec<NewsgroupInfo> {
    let mut groups = Vec::with_capacity(lines.len());
    for line in lines {
        let mut parts = line.splitn(2, [' ', '\t']);
        let Some(name) = parts.next().filter(|n| !n.is_empty()) else {
            continue;
        };

        groups.push(NewsgroupInfo {
            name: name.to_string(),
            description: parts.next().unwrap_or("").trim().to_string(),
        });
    }
    groups
}
