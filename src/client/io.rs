//! Low-level command orchestration
//!
//! Every command follows the same shape: write one CRLF-terminated request
//! line, read one status line, classify it, and for long responses read the
//! dot-terminated payload. The configured deadline applies to each I/O
//! operation; a timeout or framing error poisons the wire and the session
//! drops its transport.

use super::NntpClient;
use crate::error::{NntpError, Result};
use crate::response::{is_long_response, parse_status_line, Response, ResponseKind};
use std::future::Future;
use std::time::Duration;
use tokio::io::AsyncWrite;
use tokio::time::timeout;
use tracing::trace;

/// Run an I/O future under the per-operation deadline.
async fn with_deadline<T>(deadline: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(NntpError::Timeout),
    }
}

impl NntpClient {
    /// Send a command line.
    pub(super) async fn send_command(&mut self, command: &str) -> Result<()> {
        trace!("C: {}", command.trim_end());
        self.send_raw(command.as_bytes()).await
    }

    /// Send raw bytes (article payloads) without logging their content.
    pub(super) async fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        let deadline = self.config.timeout;
        let transport = self.transport()?;
        let result = with_deadline(deadline, transport.write_all(bytes)).await;
        self.guard(result)
    }

    /// Read and classify one status line.
    ///
    /// 4xx and 5xx replies come back as [`NntpError::Temporary`] and
    /// [`NntpError::Permanent`]; the returned response is always 1xx, 2xx,
    /// or 3xx.
    pub(super) async fn read_status(&mut self) -> Result<Response> {
        let deadline = self.config.timeout;
        let transport = self.transport()?;
        let result = with_deadline(deadline, transport.read_line()).await;
        let line = self.guard(result)?;
        trace!("S: {}", line);

        let parsed = parse_status_line(&line);
        let (code, message) = self.guard(parsed)?;

        let response = Response {
            code,
            message,
            lines: vec![],
        };
        match response.kind() {
            ResponseKind::TemporaryFailure => Err(NntpError::Temporary {
                code: response.code,
                message: response.message,
            }),
            ResponseKind::PermanentFailure => Err(NntpError::Permanent {
                code: response.code,
                message: response.message,
            }),
            _ => Ok(response),
        }
    }

    /// Issue a command expecting a single-line reply.
    pub(super) async fn short_command(&mut self, command: &str) -> Result<Response> {
        self.send_command(command).await?;
        self.read_status().await
    }

    /// Issue a command expecting a multi-line reply.
    pub(super) async fn long_command(&mut self, command: &str) -> Result<Response> {
        self.long_command_allowing(command, None).await
    }

    /// Issue a command expecting a multi-line reply, additionally accepting
    /// `extra` as a long-response code. LISTGROUP passes 211 here; that
    /// code is short in every other context.
    pub(super) async fn long_command_allowing(
        &mut self,
        command: &str,
        extra: Option<u16>,
    ) -> Result<Response> {
        self.send_command(command).await?;
        let mut response = self.read_status().await?;

        if !is_long_response(response.code) && extra != Some(response.code) {
            return Err(NntpError::Reply(response.raw_status()));
        }

        let deadline = self.config.timeout;
        let transport = self.transport()?;
        let result = with_deadline(deadline, transport.read_multiline()).await;
        let lines = self.guard(result)?;
        trace!("S: {} payload lines", lines.len());

        response.lines = lines;
        Ok(response)
    }

    /// Read a multi-line payload directly into `sink` after the status line
    /// has already been checked.
    pub(super) async fn read_payload_into<W>(&mut self, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let deadline = self.config.timeout;
        let transport = self.transport()?;
        let result = with_deadline(deadline, transport.read_multiline_into(sink)).await;
        self.guard(result)
    }

    /// Drop the transport when an error poisons the wire; pass data-level
    /// errors through untouched.
    fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_fatal() {
                self.mark_broken();
            }
        }
        result
    }

    /// Require an exact status code, surfacing anything else as a
    /// wrong-category reply.
    pub(super) fn expect_code(response: &Response, code: u16) -> Result<()> {
        if response.code == code {
            Ok(())
        } else {
            Err(NntpError::Reply(response.raw_status()))
        }
    }
}
