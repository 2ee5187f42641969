//! Prefix-based chat command parser.
//!
//! Only messages starting with one of the two configured prefixes are considered, which
//! keeps ordinary conversation from triggering commands. The command word is matched
//! case-insensitively; everything after the first whitespace is the argument string.
use log::trace;

use crate::config::ChatConfig;
use crate::logutil::escape_log;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// `dexsearch <args>` or its alias `ds <args>`.
    DexSearch { args: String, broadcast: bool },
    /// `help [topic]`.
    Help { topic: Option<String>, broadcast: bool },
    /// Prefixed, but not a command this crate serves.
    Unsupported(String),
    /// Not a command at all.
    Unknown,
}

pub struct ChatCommandParser {
    private_prefix: String,
    broadcast_prefix: String,
}

impl ChatCommandParser {
    pub fn new(private_prefix: &str, broadcast_prefix: &str) -> Self {
        Self {
            private_prefix: private_prefix.to_string(),
            broadcast_prefix: broadcast_prefix.to_string(),
        }
    }

    pub fn from_config(cfg: &ChatConfig) -> Self {
        Self::new(&cfg.private_prefix, &cfg.broadcast_prefix)
    }

    pub fn private_prefix(&self) -> &str {
        &self.private_prefix
    }

    pub fn parse(&self, raw: &str) -> ChatCommand {
        let trimmed = raw.trim();
        let (body, broadcast) = if let Some(rest) = trimmed.strip_prefix(&self.broadcast_prefix) {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix(&self.private_prefix) {
            (rest, false)
        } else {
            return ChatCommand::Unknown;
        };

        let (word, args) = match body.find(char::is_whitespace) {
            Some(idx) => (&body[..idx], body[idx..].trim()),
            None => (body, ""),
        };
        if word.is_empty() {
            return ChatCommand::Unknown;
        }

        let word_lc = word.to_ascii_lowercase();
        let cmd = match word_lc.as_str() {
            "dexsearch" | "ds" => ChatCommand::DexSearch {
                args: args.to_string(),
                broadcast,
            },
            "help" => ChatCommand::Help {
                topic: (!args.is_empty()).then(|| args.to_ascii_lowercase()),
                broadcast,
            },
            _ => ChatCommand::Unsupported(word.to_string()),
        };
        trace!("Parsed {:?} from '{}'", cmd, escape_log(raw));
        cmd
    }
}

impl Default for ChatCommandParser {
    fn default() -> Self {
        Self::from_config(&ChatConfig::default())
    }
}
