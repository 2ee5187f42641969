//! Turns parsed chat commands into replies.
//!
//! [`DexCommandHandler`] owns the shared catalog and is safe to call from many tasks at
//! once; every search is independent and reads the catalog immutably.

use anyhow::{anyhow, Result};
use log::debug;
use std::sync::Arc;

use crate::chat::parser::{ChatCommand, ChatCommandParser};
use crate::config::Config;
use crate::dex::catalog::Catalog;
use crate::dex::errors::DexSearchError;
use crate::dex::help::dexsearch_help;
use crate::dex::learnset::LearnsetTable;
use crate::dex::query::{parse_with, CategoryKind, ParseOptions};
use crate::dex::search::{search, SearchOptions};
use crate::logutil::escape_log;

/// Text to send back, and whether it goes to the whole room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub broadcast: bool,
}

impl Reply {
    fn private(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            broadcast: false,
        }
    }
}

pub struct DexCommandHandler {
    catalog: Arc<Catalog>,
    parser: ChatCommandParser,
    options: SearchOptions,
    allow_broadcast_show_all: bool,
}

impl DexCommandHandler {
    pub fn new(catalog: Arc<Catalog>, config: &Config) -> Self {
        Self {
            catalog,
            parser: ChatCommandParser::from_config(&config.chat),
            options: config.search.options(),
            allow_broadcast_show_all: config.search.allow_broadcast_show_all,
        }
    }

    /// Load the catalog named in the config and build a handler around it.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let path = &config.catalog.path;
        let catalog = Catalog::load(path)
            .await
            .map_err(|e| anyhow!("Failed to load catalog {}: {}", path, e))?;
        Ok(Self::new(Arc::new(catalog), config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle one raw chat line. `None` means the line was not a command.
    pub fn handle_message(&self, raw: &str) -> Option<Reply> {
        match self.parser.parse(raw) {
            ChatCommand::Unknown => None,
            cmd => Some(self.handle(cmd)),
        }
    }

    pub fn handle(&self, cmd: ChatCommand) -> Reply {
        match cmd {
            ChatCommand::DexSearch { args, broadcast } => self.dexsearch(&args, broadcast),
            ChatCommand::Help { topic, broadcast } => self.help(topic.as_deref(), broadcast),
            ChatCommand::Unsupported(word) => Reply::private(format!(
                "The command '{}{}' was unrecognized.",
                self.parser.private_prefix(),
                word
            )),
            ChatCommand::Unknown => Reply::private(""),
        }
    }

    /// Run one search. Errors always go back to the sender only.
    pub fn dexsearch(&self, args: &str, broadcast: bool) -> Reply {
        let opts = ParseOptions {
            broadcast: broadcast && !self.allow_broadcast_show_all,
        };
        let table = LearnsetTable::new(self.catalog.as_ref());
        let outcome = parse_with(args, self.catalog.as_ref(), opts)
            .and_then(|query| search(&query, self.catalog.as_ref(), &table, self.options));

        match outcome {
            Ok(result) => {
                debug!(
                    "dexsearch '{}' -> {} matches ({} shown)",
                    escape_log(args),
                    result.total(),
                    result.names().len()
                );
                Reply {
                    text: result.to_string(),
                    broadcast,
                }
            }
            Err(DexSearchError::EmptyQuery) => self.help(Some("dexsearch"), false),
            Err(err) => {
                debug!("dexsearch '{}' rejected: {}", escape_log(args), err);
                Reply::private(self.error_text(&err))
            }
        }
    }

    fn help(&self, topic: Option<&str>, broadcast: bool) -> Reply {
        let prefix = self.parser.private_prefix();
        let text = match topic {
            None | Some("dexsearch") | Some("ds") | Some("all") => dexsearch_help(prefix).join("\n"),
            Some(other) => format!(
                "Help for \"{}\" is not available. Try {}help dexsearch.",
                other, prefix
            ),
        };
        Reply { text, broadcast }
    }

    fn error_text(&self, err: &DexSearchError) -> String {
        let prefix = self.parser.private_prefix();
        match err {
            DexSearchError::CategoryCapExceeded { category, limit } => match category {
                CategoryKind::Move => format!("Specify a maximum of {} moves.", limit),
                CategoryKind::Ability => "Specify only one ability.".to_string(),
                CategoryKind::Type => "Specify a maximum of two types.".to_string(),
                other => format!("Specify a maximum of {} {}.", limit, other),
            },
            DexSearchError::ShowAllWithoutFilters => format!(
                "No search parameters other than \"all\" were found.\nTry \"{}help dexsearch\" for more information on this command.",
                prefix
            ),
            DexSearchError::ShowAllInBroadcast => {
                "A search with the parameter \"all\" cannot be broadcast.".to_string()
            }
            DexSearchError::UnknownMoveInFilter(mv) => format!("\"{}\" is not a known move.", mv),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> DexCommandHandler {
        let catalog = Catalog::from_json_str(
            r#"{
            "types": ["Dragon", "Flying"],
            "moves": [{ "id": "roost", "name": "Roost" }],
            "species": [
                { "id": "altaria", "name": "Altaria", "types": ["Dragon", "Flying"],
                  "tier": "UU", "color": "Blue", "gen": 3, "learnset": { "roost": ["4M"] } }
            ]
        }"#,
        )
        .unwrap();
        DexCommandHandler::new(Arc::new(catalog), &Config::default())
    }

    #[test]
    fn private_search_reply() {
        let reply = handler().handle_message("/dexsearch roost").unwrap();
        assert_eq!(reply, Reply { text: "Altaria".into(), broadcast: false });
    }

    #[test]
    fn broadcast_search_reply() {
        let reply = handler().handle_message("!dexsearch dragon type").unwrap();
        assert!(reply.broadcast);
        assert_eq!(reply.text, "Altaria");
    }

    #[test]
    fn errors_use_user_facing_wording_and_stay_private() {
        let h = handler();
        let reply = h.handle_message("!dexsearch uu, all").unwrap();
        assert_eq!(reply.text, "A search with the parameter \"all\" cannot be broadcast.");
        assert!(!reply.broadcast);

        let reply = h.handle_message("/dexsearch all").unwrap();
        assert!(reply.text.starts_with("No search parameters other than \"all\" were found."));

        let reply = h.handle_message("/ds moonblast").unwrap();
        assert_eq!(
            reply.text,
            "\"moonblast\" could not be found in any of the search categories."
        );

        let reply = h
            .handle_message("/ds dragon type, flying type, dragon type, normal type")
            .unwrap();
        assert_eq!(
            reply.text,
            "\"normal type\" could not be found in any of the search categories."
        );
    }

    #[test]
    fn bare_command_shows_help() {
        let reply = handler().handle_message("/dexsearch").unwrap();
        assert!(reply.text.starts_with("/dexsearch [type], [move]"));
    }

    #[test]
    fn plain_text_is_ignored() {
        assert!(handler().handle_message("hello there").is_none());
    }

    #[test]
    fn unsupported_command_reply() {
        let reply = handler().handle_message("/learn altaria, roost").unwrap();
        assert_eq!(reply.text, "The command '/learn' was unrecognized.");
    }
}
