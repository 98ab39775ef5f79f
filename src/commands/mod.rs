//! NNTP command builders and response parsers
//!
//! Builders produce the exact CRLF-terminated line sent on the wire.
//! Parsers turn classified responses into the typed records the client
//! returns.

pub mod article;
pub mod group;
pub mod list;
pub mod over;

pub use article::*;
pub use group::*;
pub use list::*;
pub use over::*;

// Session management and authentication

/// Build CAPABILITIES command (RFC 3977 §5.2)
///
/// Response is multi-line, starting with 101.
pub fn capabilities() -> &'static str {
    "CAPABILITIES\r\n"
}

/// Build MODE READER command (RFC 3977 §5.3)
///
/// Instructs the server to switch to reader mode.
pub fn mode_reader() -> &'static str {
    "MODE READER\r\n"
}

/// Build AUTHINFO USER command (RFC 4643 §2.3)
pub fn authinfo_user(username: &str) -> String {
    format!("AUTHINFO USER {}\r\n", username)
}

/// Build AUTHINFO PASS command (RFC 4643 §2.3)
pub fn authinfo_pass(password: &str) -> String {
    format!("AUTHINFO PASS {}\r\n", password)
}

/// Build STARTTLS command (RFC 4642)
///
/// Initiates the in-band TLS upgrade; the server answers 382 when ready
/// for the handshake.
pub fn starttls() -> &'static str {
    "STARTTLS\r\n"
}

/// Build QUIT command
pub fn quit() -> &'static str {
    "QUIT\r\n"
}

// Server queries

/// Build DATE command (RFC 3977 §7.1)
///
/// Response: 111 yyyymmddhhmmss
pub fn date() -> &'static str {
    "DATE\r\n"
}

/// Build HELP command (RFC 3977 §7.2)
///
/// Response is multi-line, starting with 100.
pub fn help() -> &'static str {
    "HELP\r\n"
}

/// Build SLAVE command (RFC 977 §3.12)
///
/// Marks the connection as coming from a slave server. Modern servers
/// answer 202 and otherwise ignore it.
pub fn slave() -> &'static str {
    "SLAVE\r\n"
}

// Article submission

/// Build POST command (RFC 3977 §6.3.1)
///
/// Server responds 340 when ready to accept; the article follows,
/// terminated by ".\r\n".
pub fn post() -> &'static str {
    "POST\r\n"
}

/// Build IHAVE command (RFC 3977 §6.3.2)
///
/// Offers an article for transfer by message-id; 335 means send it.
pub fn ihave(message_id: &str) -> String {
    format!("IHAVE {}\r\n", message_id)
}
