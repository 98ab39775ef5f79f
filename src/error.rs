//! NNTP error types

use thiserror::Error;

/// Low-level protocol violations detected by the framer and response
/// classifier. These indicate the byte stream no longer follows NNTP and the
/// session cannot be resynchronized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// Response line did not start with three ASCII digits followed by a
    /// space or end-of-line
    #[error("malformed status line: {0:?}")]
    BadStatus(String),

    /// A line exceeded the maximum permitted length (including terminator)
    #[error("line exceeds {0} bytes")]
    LineTooLong(usize),

    /// The stream ended before a line or multi-line terminator was seen
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// STARTTLS was attempted while unread bytes sat in the framer buffer
    #[error("plaintext bytes buffered across the TLS upgrade boundary")]
    DirtyTlsBoundary,
}

/// Payload content errors: the server replied with a well-formed response
/// whose body violates the command's data invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// DATE reply was not exactly 14 digits, or a date stamp failed to parse
    #[error("malformed date stamp: {0:?}")]
    BadDate(String),

    /// LIST OVERVIEW.FMT reply did not start with the seven default fields
    #[error("invalid overview format: {0}")]
    OverviewFmtInvalid(String),

    /// An extended overview field value lacked its "Name: " prefix
    #[error("overview field {field:?} missing header-name prefix in {value:?}")]
    OverMissingHeaderName {
        /// Descriptor field name the value was assigned to
        field: String,
        /// Raw value as received
        value: String,
    },

    /// An overview record did not start with an article number
    #[error("malformed overview record: {0:?}")]
    BadOverviewRecord(String),
}

/// NNTP protocol and connection errors
#[derive(Error, Debug)]
pub enum NntpError {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS error during secure connection or STARTTLS upgrade
    #[error("TLS error: {0}")]
    Tls(String),

    /// Connect or per-operation I/O deadline exceeded
    #[error("operation timed out")]
    Timeout,

    /// Server returned a 4xx status; the caller may retry later
    #[error("temporary failure {code}: {message}")]
    Temporary {
        /// NNTP response code (e.g. 411, 430, 480)
        code: u16,
        /// Status text from the server
        message: String,
    },

    /// Server returned a 5xx status, or rejected AUTHINFO PASS
    #[error("permanent failure {code}: {message}")]
    Permanent {
        /// NNTP response code (e.g. 500, 502)
        code: u16,
        /// Status text from the server
        message: String,
    },

    /// Syntactically valid reply outside the command's expected status set
    /// (e.g. GROUP did not yield 211, or a short reply arrived where a
    /// long response was required). Carries the full raw status line.
    #[error("unexpected reply: {0}")]
    Reply(String),

    /// The byte stream violated NNTP framing or status-line syntax
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// Response payload broke a data invariant
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// login() called on an already-authenticated session
    #[error("already authenticated")]
    AlreadyLoggedIn,

    /// starttls() called while TLS is already active
    #[error("TLS already enabled")]
    TlsAlreadyEnabled,

    /// starttls() called after authentication
    #[error("TLS upgrade refused after authentication")]
    TlsForbiddenAfterAuth,

    /// Command issued on a closed or broken session
    #[error("not connected")]
    NotConnected,
}

impl NntpError {
    /// True when the session is left unusable by this error and the caller
    /// must reconnect.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            NntpError::Io(_)
                | NntpError::Tls(_)
                | NntpError::Timeout
                | NntpError::Protocol(_)
                | NntpError::NotConnected
        )
    }
}

/// Result type alias using NntpError
pub type Result<T> = std::result::Result<T, NntpError>;
