//! Console commands
//!
//! Parses one line of console input into a cache operation.

use std::str::FromStr;

use crate::error::CacheError;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// A parsed console command.
///
/// # Grammar
/// - `PUT <key> <value...>` - value is the rest of the line (alias `SET`)
/// - `GET <key>` / `PEEK <key>` / `DEL <key>` (alias `DELETE`)
/// - `KEYS` / `LEN` / `STATS` / `CLEAR`
///
/// Verbs are case-insensitive; keys are single whitespace-free tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { key: String, value: String },
    Get { key: String },
    Peek { key: String },
    Delete { key: String },
    Keys,
    Len,
    Stats,
    Clear,
}

impl FromStr for Command {
    type Err = CacheError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = split_token(line);
        if verb.is_empty() {
            return Err(CacheError::InvalidCommand("empty line".to_string()));
        }

        let command = match verb.to_ascii_uppercase().as_str() {
            "PUT" | "SET" => {
                let (key, value) = split_token(rest);
                let key = validate_key(key)?;
                if value.is_empty() {
                    return Err(CacheError::InvalidCommand(format!(
                        "PUT {} is missing a value",
                        key
                    )));
                }
                Command::Put {
                    key,
                    value: value.to_string(),
                }
            }
            "GET" => Command::Get {
                key: single_key(verb, rest)?,
            },
            "PEEK" => Command::Peek {
                key: single_key(verb, rest)?,
            },
            "DEL" | "DELETE" => Command::Delete {
                key: single_key(verb, rest)?,
            },
            "KEYS" => no_args(verb, rest, Command::Keys)?,
            "LEN" => no_args(verb, rest, Command::Len)?,
            "STATS" => no_args(verb, rest, Command::Stats)?,
            "CLEAR" => no_args(verb, rest, Command::Clear)?,
            other => {
                return Err(CacheError::InvalidCommand(format!(
                    "unknown command '{}'",
                    other
                )))
            }
        };
        Ok(command)
    }
}

/// Splits off the first whitespace-delimited token.
fn split_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], input[at..].trim()),
        None => (input, ""),
    }
}

fn validate_key(key: &str) -> Result<String, CacheError> {
    if key.is_empty() {
        return Err(CacheError::InvalidCommand("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidCommand(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(key.to_string())
}

fn single_key(verb: &str, rest: &str) -> Result<String, CacheError> {
    let (key, extra) = split_token(rest);
    if !extra.is_empty() {
        return Err(CacheError::InvalidCommand(format!(
            "{} takes exactly one key",
            verb.to_ascii_uppercase()
        )));
    }
    validate_key(key)
}

fn no_args(verb: &str, rest: &str, command: Command) -> Result<Command, CacheError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CacheError::InvalidCommand(format!(
            "{} takes no arguments",
            verb.to_ascii_uppercase()
        )))
    }
}
