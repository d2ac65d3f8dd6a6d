//! Console replies
//!
//! One JSON object is written to stdout per executed command.

use serde::Serialize;

use crate::cache::CacheStats;

/// Reply to a console command, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Value stored; `evicted` names the key dropped to make room
    Put { key: String, evicted: Option<String> },
    /// Lookup that promoted the key on a hit
    Get { key: String, value: Option<String> },
    /// Lookup without promotion
    Peek { key: String, value: Option<String> },
    Delete { key: String, removed: bool },
    /// Keys from most to least recently used
    Keys { keys: Vec<String> },
    Len { len: usize, capacity: usize },
    Stats {
        #[serde(flatten)]
        stats: CacheStats,
        hit_rate: f64,
    },
    Clear { removed: usize },
    Error { error: String },
}

impl Reply {
    pub fn stats(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Reply::Stats { stats, hit_rate }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Reply::Error {
            error: error.into(),
        }
    }

    /// Renders the reply as a single JSON line.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|err| format!(r#"{{"kind":"error","error":"{}"}}"#, err))
    }
}
