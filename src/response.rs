//! NNTP response types, status classification, and response codes

use crate::error::{ProtocolViolation, Result};

/// Status codes whose replies carry a multi-line payload terminated by a
/// lone `.` line (RFC 3977 §3.2 plus the XGTITLE extension).
///
/// 211 is deliberately absent: it is long only as a reply to LISTGROUP, and
/// short as a reply to GROUP. The LISTGROUP path opts in explicitly.
pub const LONG_RESPONSE_CODES: [u16; 11] = [100, 101, 215, 220, 221, 222, 224, 225, 230, 231, 282];

/// Whether `code` always admits a multi-line payload.
pub fn is_long_response(code: u16) -> bool {
    LONG_RESPONSE_CODES.contains(&code)
}

/// Broad classification of a response status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// 1xx - informational
    Informational,
    /// 2xx - command completed successfully
    Success,
    /// 3xx - command accepted so far, send the rest
    Continuation,
    /// 4xx - command failed for a transient reason
    TemporaryFailure,
    /// 5xx - command failed permanently
    PermanentFailure,
}

/// NNTP response with status code, message, and optional multi-line payload
#[derive(Debug, Clone)]
pub struct Response {
    /// 3-digit NNTP response code
    pub code: u16,
    /// Status text from the first line (code and separator stripped)
    pub message: String,
    /// Multi-line payload, dot-unstuffed, terminator removed. Empty for
    /// short responses.
    pub lines: Vec<String>,
}

impl Response {
    /// Classify the status code into its broad category.
    ///
    /// The status-line parser only produces codes in 100..=599, so every
    /// constructed response has a kind.
    pub fn kind(&self) -> ResponseKind {
        match self.code / 100 {
            1 => ResponseKind::Informational,
            2 => ResponseKind::Success,
            3 => ResponseKind::Continuation,
            4 => ResponseKind::TemporaryFailure,
            _ => ResponseKind::PermanentFailure,
        }
    }

    /// Check if the response indicates success (2xx)
    pub fn is_success(&self) -> bool {
        self.kind() == ResponseKind::Success
    }

    /// Check if the response indicates continuation (3xx)
    pub fn is_continuation(&self) -> bool {
        self.kind() == ResponseKind::Continuation
    }

    /// Reconstruct the status line as received (without the terminator)
    pub fn raw_status(&self) -> String {
        if self.message.is_empty() {
            format!("{}", self.code)
        } else {
            format!("{} {}", self.code, self.message)
        }
    }
}

/// Parse an NNTP status line into code and message.
///
/// The line must be at least three characters, the first three ASCII digits,
/// and the fourth (when present) a space. The leading digit must be 1-5.
/// Anything else is a protocol violation: resynchronizing on a stream that
/// produced a malformed status line is not possible.
pub fn parse_status_line(line: &str) -> Result<(u16, String)> {
    let bytes = line.as_bytes();
    if bytes.len() < 3
        || !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[2].is_ascii_digit()
        || (bytes.len() > 3 && bytes[3] != b' ')
    {
        return Err(ProtocolViolation::BadStatus(line.chars().take(100).collect()).into());
    }

    if !(b'1'..=b'5').contains(&bytes[0]) {
        return Err(ProtocolViolation::BadStatus(line.chars().take(100).collect()).into());
    }

    // Safe to slice: the first three bytes are ASCII digits
    let code = line[0..3]
        .parse::<u16>()
        .map_err(|_| ProtocolViolation::BadStatus(line.chars().take(100).collect()))?;

    let message = if line.len() > 4 {
        line[4..].to_string()
    } else {
        String::new()
    };

    Ok((code, message))
}

/// NNTP response codes (RFC 3977, RFC 4642, RFC 4643)
#[allow(dead_code)]
pub mod codes {
    // 1xx - Informational
    /// Help text follows
    pub const HELP_TEXT_FOLLOWS: u16 = 100;
    /// Capability list follows (RFC 3977 Section 5.2)
    pub const CAPABILITY_LIST: u16 = 101;
    /// Server date/time (RFC 3977 Section 7.1)
    pub const SERVER_DATE: u16 = 111;

    // 2xx - Success
    /// Server ready, posting allowed
    pub const READY_POSTING_ALLOWED: u16 = 200;
    /// Server ready, no posting
    pub const READY_NO_POSTING: u16 = 201;
    /// Slave status noted (RFC 977 §3.12)
    pub const SLAVE_STATUS_NOTED: u16 = 202;
    /// Closing connection
    pub const CLOSING_CONNECTION: u16 = 205;
    /// Group selected
    pub const GROUP_SELECTED: u16 = 211;
    /// List of newsgroups follows (RFC 3977 Section 7.6)
    pub const LIST_INFORMATION_FOLLOWS: u16 = 215;
    /// Article follows
    pub const ARTICLE_FOLLOWS: u16 = 220;
    /// Head follows
    pub const HEAD_FOLLOWS: u16 = 221;
    /// Body follows
    pub const BODY_FOLLOWS: u16 = 222;
    /// Article stat
    pub const ARTICLE_STAT: u16 = 223;
    /// Overview information follows
    pub const OVERVIEW_INFO_FOLLOWS: u16 = 224;
    /// Headers follow
    pub const HEADERS_FOLLOW: u16 = 225;
    /// List of new articles follows (RFC 3977 Section 7.4)
    pub const NEW_ARTICLE_LIST_FOLLOWS: u16 = 230;
    /// List of new newsgroups follows (RFC 3977 Section 7.3)
    pub const NEW_NEWSGROUPS_FOLLOW: u16 = 231;
    /// Article transferred OK (RFC 3977 Section 6.3.2)
    pub const ARTICLE_TRANSFERRED: u16 = 235;
    /// Article posted successfully (RFC 3977 Section 6.3.1)
    pub const ARTICLE_POSTED: u16 = 240;
    /// Authentication accepted (RFC 4643)
    pub const AUTH_ACCEPTED: u16 = 281;
    /// Group title list follows (XGTITLE extension)
    pub const XGTITLE_LIST_FOLLOWS: u16 = 282;

    // 3xx - Continuation
    /// Send article to be transferred (RFC 3977 Section 6.3.2)
    pub const SEND_ARTICLE_TRANSFER: u16 = 335;
    /// Send article to be posted
    pub const SEND_ARTICLE: u16 = 340;
    /// Continue with authentication
    pub const AUTH_CONTINUE: u16 = 381;
    /// Continue with TLS negotiation (RFC 4642)
    pub const CONTINUE_TLS: u16 = 382;

    // 4xx - Temporary errors
    /// Service temporarily unavailable
    pub const SERVICE_UNAVAILABLE: u16 = 400;
    /// No such newsgroup
    pub const NO_SUCH_GROUP: u16 = 411;
    /// No newsgroup selected
    pub const NO_GROUP_SELECTED: u16 = 412;
    /// No current article
    pub const NO_CURRENT_ARTICLE: u16 = 420;
    /// No next article
    pub const NO_NEXT_ARTICLE: u16 = 421;
    /// No previous article
    pub const NO_PREV_ARTICLE: u16 = 422;
    /// No article with that number
    pub const NO_SUCH_ARTICLE_NUMBER: u16 = 423;
    /// No article with that message-id
    pub const NO_SUCH_ARTICLE_ID: u16 = 430;
    /// Article not wanted (RFC 3977 Section 6.3.2)
    pub const ARTICLE_NOT_WANTED: u16 = 435;
    /// Transfer not possible; try again later (RFC 3977 Section 6.3.2)
    pub const TRANSFER_NOT_POSSIBLE: u16 = 436;
    /// Transfer rejected; do not retry (RFC 3977 Section 6.3.2)
    pub const TRANSFER_REJECTED: u16 = 437;
    /// Posting not permitted (RFC 3977 Section 6.3.1)
    pub const POSTING_NOT_PERMITTED: u16 = 440;
    /// Posting failed (RFC 3977 Section 6.3.1)
    pub const POSTING_FAILED: u16 = 441;
    /// Authentication required (RFC 4643)
    pub const AUTH_REQUIRED: u16 = 480;
    /// Authentication rejected (RFC 4643)
    pub const AUTH_REJECTED: u16 = 481;

    // 5xx - Permanent errors
    /// Command not recognized
    pub const COMMAND_NOT_RECOGNIZED: u16 = 500;
    /// Command syntax error
    pub const COMMAND_SYNTAX_ERROR: u16 = 501;
    /// Access denied / command unavailable
    pub const ACCESS_DENIED: u16 = 502;
    /// Feature not supported / optional functionality absent (RFC 3977)
    pub const FEATURE_NOT_SUPPORTED: u16 = 503;
    /// TLS negotiation failed or unavailable (RFC 4642)
    pub const TLS_FAILED: u16 = 580;
}
