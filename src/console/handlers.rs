//! Console Handlers
//!
//! Executes parsed commands against the shared cache.

use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::models::{Command, Reply};

/// Cache type driven by the console: string keys and values.
pub type ConsoleCache = SharedCache<String, String>;

/// Runs one command, holding the cache lock only for its duration.
pub async fn execute(cache: &ConsoleCache, command: Command) -> Reply {
    match command {
        Command::Put { key, value } => {
            let evicted = cache.put(key.clone(), value).await.map(|(k, _)| k);
            if let Some(evicted_key) = &evicted {
                debug!(key = %key, evicted = %evicted_key, "put evicted an entry");
            }
            Reply::Put { key, evicted }
        }
        Command::Get { key } => {
            let value = cache.get(key.as_str()).await;
            Reply::Get { key, value }
        }
        Command::Peek { key } => {
            let value = cache.peek(key.as_str()).await;
            Reply::Peek { key, value }
        }
        Command::Delete { key } => {
            let removed = cache.remove(key.as_str()).await.is_some();
            Reply::Delete { key, removed }
        }
        Command::Keys => Reply::Keys {
            keys: cache.keys().await,
        },
        Command::Len => {
            let guard = cache.lock().await;
            Reply::Len {
                len: guard.len(),
                capacity: guard.capacity(),
            }
        }
        Command::Stats => Reply::stats(cache.stats().await),
        Command::Clear => Reply::Clear {
            removed: cache.clear().await,
        },
    }
}

/// Parses and executes one input line.
///
/// Returns None for blank lines. Malformed lines produce an error reply.
pub async fn handle_line(cache: &ConsoleCache, line: &str) -> Option<Reply> {
    if line.trim().is_empty() {
        return None;
    }
    let reply = match line.parse::<Command>() {
        Ok(command) => execute(cache, command).await,
        Err(err) => {
            warn!(error = %err, "rejected console line");
            Reply::error(err.to_string())
        }
    };
    Some(reply)
}
