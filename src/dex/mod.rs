//! # Species Search
//!
//! Multi-criteria search over a read-only species catalog, as used by the `dexsearch`
//! chat command.
//!
//! ## Components
//!
//! - [`catalog`] - species, move and ability records plus the JSON seed loader
//! - [`learnset`] - learnability predicate used by move filters
//! - [`query`] - comma-separated query parser producing typed filter categories
//! - [`search`] - narrowing engine and result presentation
//! - [`help`] - user-facing help text
//!
//! ## Flow
//!
//! ```text
//! raw string ─▶ query::parse ─▶ ParsedQuery ─▶ search::search ─▶ SearchResult
//!                                   │                 │
//!                              CatalogProvider    Learnability
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dexsearch::dex::{Catalog, LearnsetTable, SearchOptions, parse, search};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let catalog = Catalog::load("data/catalog.json").await?;
//! let learnsets = LearnsetTable::new(&catalog);
//! let query = parse("dragon type, uber", &catalog)?;
//! let result = search(&query, &catalog, &learnsets, SearchOptions::default())?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod errors;
pub mod help;
pub mod learnset;
pub mod query;
pub mod search;

pub use catalog::{to_id, Ability, Catalog, CatalogProvider, Move, Species};
pub use errors::{CatalogError, DexSearchError};
pub use learnset::{LearnContext, LearnVerdict, Learnability, LearnsetTable};
pub use query::{parse, parse_with, CategoryKind, FilterCategory, ParseOptions, ParsedQuery};
pub use search::{narrow, search, search_with_rng, SearchOptions, SearchResult};
