//! Console Session
//!
//! Reads commands line by line and writes one JSON reply per line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use super::handlers::{handle_line, ConsoleCache};
use crate::error::CacheError;
use crate::models::Reply;

/// Drives the cache from `reader` until end of input.
///
/// Returns the number of commands answered (blank lines are skipped and
/// not counted). A line that is not valid UTF-8 gets an error reply.
pub async fn run_session<R, W>(
    cache: &ConsoleCache,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut answered = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        let reply = match std::str::from_utf8(raw) {
            Ok(line) => match handle_line(cache, line).await {
                Some(reply) => reply,
                None => continue,
            },
            Err(err) => {
                warn!(error = %err, "rejected non UTF-8 console line");
                Reply::error(
                    CacheError::InvalidCommand("line is not valid UTF-8".to_string()).to_string(),
                )
            }
        };

        let mut out = reply.to_json_line();
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
        answered += 1;
    }

    debug!(answered, "console input closed");
    Ok(answered)
}
