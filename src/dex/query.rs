//! Query parser for multi-criteria species searches.
//!
//! A query is a comma-separated list of free-form tokens such as
//! `"dragon type, uber, dragon dance"`. Each non-empty token is classified into exactly
//! one filter category, tried in a fixed priority order:
//!
//! 1. move name
//! 2. ability name
//! 3. tier label (`uber`, `ou`, `uu`, `ru`, `nu`, `lc`, `cap`, `bl`, `bl2`, `nfe`, `limbo`)
//! 4. color label (`green`, `red`, `blue`, `white`, `brown`, `yellow`, `purple`, `pink`, `gray`, `black`)
//! 5. generation number (1..=5)
//! 6. the literal `all` (show-all flag, consumes no category)
//! 7. `<type> type`, e.g. `fire type`
//!
//! Anything else aborts the whole query with [`DexSearchError::UnrecognizedToken`].
//! Categories appear in [`ParsedQuery::categories`] in the order the query first
//! mentioned them.

use log::trace;
use std::collections::BTreeSet;
use std::fmt;

use crate::dex::catalog::{to_id, CatalogProvider};
use crate::dex::errors::DexSearchError;
use crate::logutil::escape_log;

pub const MAX_MOVES: usize = 4;
pub const MAX_ABILITIES: usize = 1;
pub const MAX_TYPES: usize = 2;

pub const TIER_LABELS: [&str; 11] = [
    "uber", "ou", "uu", "ru", "nu", "lc", "cap", "bl", "bl2", "nfe", "limbo",
];

pub const COLOR_LABELS: [&str; 10] = [
    "green", "red", "blue", "white", "brown", "yellow", "purple", "pink", "gray", "black",
];

const SHOW_ALL: &str = "all";
const TYPE_SUFFIX: &str = " type";

/// Filter dimension without its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryKind {
    Move,
    Ability,
    Tier,
    Color,
    Generation,
    Type,
}

impl CategoryKind {
    /// Maximum number of distinct values one query may give, if bounded.
    pub fn cap(self) -> Option<usize> {
        match self {
            CategoryKind::Move => Some(MAX_MOVES),
            CategoryKind::Ability => Some(MAX_ABILITIES),
            CategoryKind::Type => Some(MAX_TYPES),
            CategoryKind::Tier | CategoryKind::Color | CategoryKind::Generation => None,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Move => "moves",
            CategoryKind::Ability => "abilities",
            CategoryKind::Tier => "tiers",
            CategoryKind::Color => "colors",
            CategoryKind::Generation => "generations",
            CategoryKind::Type => "types",
        };
        f.write_str(label)
    }
}

/// One filter category with the values the query gave for it.
///
/// Move and ability values are catalog ids, tiers and colors are lowercase labels,
/// types are canonical capitalized type names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCategory {
    Move { moves: Vec<String> },
    Ability { abilities: BTreeSet<String> },
    Tier { tiers: BTreeSet<String> },
    Color { colors: BTreeSet<String> },
    Generation { gens: BTreeSet<u8> },
    Type { types: BTreeSet<String> },
}

impl FilterCategory {
    pub fn kind(&self) -> CategoryKind {
        match self {
            FilterCategory::Move { .. } => CategoryKind::Move,
            FilterCategory::Ability { .. } => CategoryKind::Ability,
            FilterCategory::Tier { .. } => CategoryKind::Tier,
            FilterCategory::Color { .. } => CategoryKind::Color,
            FilterCategory::Generation { .. } => CategoryKind::Generation,
            FilterCategory::Type { .. } => CategoryKind::Type,
        }
    }

    /// Number of distinct values held.
    pub fn count(&self) -> usize {
        match self {
            FilterCategory::Move { moves } => moves.len(),
            FilterCategory::Ability { abilities } => abilities.len(),
            FilterCategory::Tier { tiers } => tiers.len(),
            FilterCategory::Color { colors } => colors.len(),
            FilterCategory::Generation { gens } => gens.len(),
            FilterCategory::Type { types } => types.len(),
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = match self {
            FilterCategory::Move { moves } => moves.clone(),
            FilterCategory::Ability { abilities } => abilities.iter().cloned().collect(),
            FilterCategory::Tier { tiers } => tiers.iter().cloned().collect(),
            FilterCategory::Color { colors } => colors.iter().cloned().collect(),
            FilterCategory::Generation { gens } => gens.iter().map(u8::to_string).collect(),
            FilterCategory::Type { types } => types.iter().cloned().collect(),
        };
        write!(f, "{}[{}]", self.kind(), values.join("|"))
    }
}

/// Result of parsing: the categories actually mentioned plus the show-all flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub categories: Vec<FilterCategory>,
    pub show_all: bool,
}

impl ParsedQuery {
    pub fn category(&self, kind: CategoryKind) -> Option<&FilterCategory> {
        self.categories.iter().find(|c| c.kind() == kind)
    }

    /// Whether the CAP tier was explicitly requested.
    pub fn wants_cap(&self) -> bool {
        matches!(
            self.category(CategoryKind::Tier),
            Some(FilterCategory::Tier { tiers }) if tiers.contains("cap")
        )
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.categories.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(" "))?;
        if self.show_all {
            write!(f, " +all")?;
        }
        Ok(())
    }
}

/// Parsing mode. Broadcast replies go to a whole room and may not use `all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub broadcast: bool,
}

/// Parse a raw query for a private reply.
pub fn parse<C: CatalogProvider + ?Sized>(
    raw: &str,
    catalog: &C,
) -> Result<ParsedQuery, DexSearchError> {
    parse_with(raw, catalog, ParseOptions::default())
}

/// Parse a raw query with explicit options.
pub fn parse_with<C: CatalogProvider + ?Sized>(
    raw: &str,
    catalog: &C,
    opts: ParseOptions,
) -> Result<ParsedQuery, DexSearchError> {
    let mut builder = QueryBuilder::default();
    let mut saw_token = false;

    for piece in raw.split(',') {
        let token = piece.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        saw_token = true;

        match classify(&token, catalog) {
            Classified::ShowAll => {
                if opts.broadcast {
                    return Err(DexSearchError::ShowAllInBroadcast);
                }
                builder.show_all = true;
            }
            Classified::Category(kind, value) => {
                trace!("token '{}' -> {}", escape_log(&token), kind);
                builder.push(kind, value)?;
            }
            Classified::Unrecognized => {
                return Err(DexSearchError::UnrecognizedToken(piece.trim().to_string()));
            }
        }
    }

    if !saw_token {
        return Err(DexSearchError::EmptyQuery);
    }
    let query = builder.finish();
    if query.categories.is_empty() {
        return Err(DexSearchError::ShowAllWithoutFilters);
    }
    Ok(query)
}

enum Classified {
    Category(CategoryKind, String),
    ShowAll,
    Unrecognized,
}

/// Classify one lowercase token; the first matching rule wins.
fn classify<C: CatalogProvider + ?Sized>(token: &str, catalog: &C) -> Classified {
    if let Some(mv) = catalog.lookup_move(token) {
        return Classified::Category(CategoryKind::Move, mv.id.clone());
    }
    if let Some(ability) = catalog.lookup_ability(token) {
        return Classified::Category(CategoryKind::Ability, to_id(&ability.id));
    }
    if TIER_LABELS.contains(&token) {
        return Classified::Category(CategoryKind::Tier, token.to_string());
    }
    if COLOR_LABELS.contains(&token) {
        return Classified::Category(CategoryKind::Color, token.to_string());
    }
    if let Ok(gen) = token.parse::<u8>() {
        if (1..=5).contains(&gen) {
            return Classified::Category(CategoryKind::Generation, gen.to_string());
        }
    }
    if token == SHOW_ALL {
        return Classified::ShowAll;
    }
    if let Some(prefix) = token.strip_suffix(TYPE_SUFFIX) {
        let canonical = capitalize(prefix.trim());
        if catalog.known_types().contains(&canonical) {
            return Classified::Category(CategoryKind::Type, canonical);
        }
    }
    Classified::Unrecognized
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Accumulates classified tokens; [`QueryBuilder::finish`] freezes them into categories.
#[derive(Debug, Default)]
struct QueryBuilder {
    order: Vec<CategoryKind>,
    values: Vec<(CategoryKind, Vec<String>)>,
    show_all: bool,
}

impl QueryBuilder {
    fn push(&mut self, kind: CategoryKind, value: String) -> Result<(), DexSearchError> {
        let idx = match self.order.iter().position(|k| *k == kind) {
            Some(idx) => idx,
            None => {
                self.order.push(kind);
                self.values.push((kind, Vec::new()));
                self.order.len() - 1
            }
        };
        let values = &mut self.values[idx].1;
        if values.contains(&value) {
            return Ok(());
        }
        if let Some(limit) = kind.cap() {
            if values.len() == limit {
                return Err(DexSearchError::CategoryCapExceeded { category: kind, limit });
            }
        }
        values.push(value);
        Ok(())
    }

    fn finish(self) -> ParsedQuery {
        let categories = self
            .values
            .into_iter()
            .map(|(kind, values)| match kind {
                CategoryKind::Move => FilterCategory::Move { moves: values },
                CategoryKind::Ability => FilterCategory::Ability {
                    abilities: values.into_iter().collect(),
                },
                CategoryKind::Tier => FilterCategory::Tier {
                    tiers: values.into_iter().collect(),
                },
                CategoryKind::Color => FilterCategory::Color {
                    colors: values.into_iter().collect(),
                },
                CategoryKind::Generation => FilterCategory::Generation {
                    gens: values.iter().filter_map(|v| v.parse().ok()).collect(),
                },
                CategoryKind::Type => FilterCategory::Type {
                    types: values.into_iter().collect(),
                },
            })
            .collect();
        ParsedQuery {
            categories,
            show_all: self.show_all,
        }
    }
}
