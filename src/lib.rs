#![doc = include_str!("../README.md")]

/// Article text handling: ordered headers and posting serialization
pub mod article;
mod capabilities;
mod client;
/// NNTP command builders and response parsers
pub mod commands;
mod config;
/// NNTP date stamp formatting and parsing
pub mod datetime;
mod error;
mod framer;
/// Overview format negotiation and record parsing
pub mod overview;
mod response;
mod transport;

pub use article::Headers;
pub use capabilities::Capabilities;
pub use client::{ArticleResp, BodyResp, HeadResp, HeaderDecoder, NntpClient};
pub use commands::{
    ActiveGroup, ArticleRange, ArticleRef, GroupResp, NewsgroupInfo, StatResp, XhdrEntry,
};
pub use config::{
    ClientConfig, TlsMode, TlsOptions, DEFAULT_PORT, DEFAULT_TIMEOUT, DEFAULT_TLS_PORT,
};
pub use error::{DataError, NntpError, ProtocolViolation, Result};
pub use overview::{OverviewEntry, OverviewFormat, DEFAULT_OVERVIEW_FIELDS};
pub use response::{codes, is_long_response, Response, ResponseKind, LONG_RESPONSE_CODES};
