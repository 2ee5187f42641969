//! # Chat Command Surface
//!
//! Glue between raw chat lines and the species search:
//!
//! - [`parser`] - recognizes prefixed commands (`/dexsearch`, `!ds`, `/help dexsearch`)
//! - [`handler`] - runs searches and turns outcomes into reply text
//!
//! A `/` prefix (configurable) answers only the sender; a `!` prefix broadcasts the reply
//! to the room. Broadcast searches may not use `all` unless the config allows it.

pub mod handler;
pub mod parser;

pub use handler::{DexCommandHandler, Reply};
pub use parser::{ChatCommand, ChatCommandParser};
