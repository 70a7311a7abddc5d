//! # Session
//!
//! The line loop: read a request, execute it, write a response.
//!
//! Blank lines are skipped. A line that doesn't decode (bad UTF-8 or bad
//! JSON) produces an `INVALID_REQUEST` response and the loop moves on; only
//! I/O failures end a session early.

use std::io::{BufRead, Write};

use anyhow::Context;
use basket_core::CartRegistry;
use tracing::{info, warn};

use crate::commands::{self, Request, Response};
use crate::config::CliConfig;
use crate::error::ApiError;

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub processed: usize,
    pub failed: usize,
}

/// Processes every line from `reader`, writing one response per request.
pub fn run_session<R, W>(
    registry: &CartRegistry,
    config: &CliConfig,
    reader: R,
    mut writer: W,
) -> anyhow::Result<SessionStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = SessionStats::default();

    for (index, bytes) in reader.split(b'\n').enumerate() {
        let line_no = index + 1;
        let bytes = bytes.with_context(|| format!("failed to read line {}", line_no))?;

        let response = match std::str::from_utf8(&bytes) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(registry, config, line.trim()),
            Err(err) => Response::Failed(ApiError::invalid_request(format!(
                "line is not valid UTF-8: {}",
                err
            ))),
        };
        if let Response::Failed(err) = &response {
            warn!(line = line_no, code = ?err.code, message = %err.message, "command failed");
            stats.failed += 1;
        }
        stats.processed += 1;

        write_response(&mut writer, &response, config.pretty)
            .with_context(|| format!("failed to write response for line {}", line_no))?;
    }

    writer.flush().context("failed to flush output")?;
    info!(
        processed = stats.processed,
        failed = stats.failed,
        carts = registry.len(),
        "session finished"
    );
    Ok(stats)
}

fn handle_line(registry: &CartRegistry, config: &CliConfig, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => return Response::Failed(ApiError::from(err)),
    };

    commands::execute(registry, config.default_user, request).unwrap_or_else(Response::Failed)
}

fn write_response<W: Write>(writer: &mut W, response: &Response, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, response)?;
    } else {
        serde_json::to_writer(&mut *writer, response)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}
