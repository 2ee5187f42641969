//! # Dexsearch - Species Search for Chat Game Servers
//!
//! Dexsearch implements the `dexsearch` chat command of a battle-simulator chat server:
//! a free-form, comma-separated query is parsed into typed filter categories and run as
//! a narrowing search over an in-memory species catalog.
//!
//! ## Features
//!
//! - **Typed Query Parsing**: moves, abilities, tiers, colors, generations and types, with
//!   per-category limits and precise error reporting for the first bad token.
//! - **Narrowing Search**: one pass per category over the shrinking working set; move
//!   filters call a pluggable learnability predicate.
//! - **Fair Sampling**: large result sets are sampled uniformly, with an `all` override.
//! - **Chat Surface**: prefix-based command parser and reply handler with broadcast rules.
//! - **Data-Driven Catalog**: species, moves and abilities loaded from a JSON seed file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dexsearch::config::Config;
//! use dexsearch::chat::DexCommandHandler;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let handler = DexCommandHandler::from_config(&config).await?;
//!     if let Some(reply) = handler.handle_message("/dexsearch dragon type, uber") {
//!         println!("{}", reply.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`dex`] - catalog, learnability, query parser and search engine
//! - [`chat`] - chat command parsing and reply generation
//! - [`config`] - configuration management
//! - [`logutil`] - log sanitizing helpers

pub mod chat;
pub mod config;
pub mod dex;
pub mod logutil;
