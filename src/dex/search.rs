//! Narrowing search over the species catalog.
//!
//! Each category of a [`ParsedQuery`] is applied as its own pass over the current working
//! set, in the order the query mentioned them:
//!
//! ```text
//! all legal species ──type──▶ ──tier──▶ ──move──▶ … ──▶ final set ──▶ SearchResult
//! ```
//!
//! Values within one category are OR-ed (any listed tier matches), except moves, which are
//! AND-ed (the species must learn every listed move). Categories are intersected, so the
//! final set does not depend on token order; running cheap filters first just keeps the
//! learnability checks down.
//!
//! Presentation: up to `result_limit` names are listed in catalog order. Larger result sets
//! are sampled uniformly at random (partial Fisher–Yates) and the remainder is counted,
//! unless the query carried `all`.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;

use crate::dex::catalog::{to_id, CatalogProvider, Species};
use crate::dex::errors::DexSearchError;
use crate::dex::learnset::{LearnContext, Learnability};
use crate::dex::query::{FilterCategory, ParsedQuery};

/// Default number of names shown before sampling kicks in.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub result_limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// Final outcome of a search, ready for the caller to format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Nothing matched. Never an error.
    NoResults,
    /// Every match, in catalog order.
    Listed(Vec<String>),
    /// A random sample of matches plus how many were left out.
    Sampled { shown: Vec<String>, hidden: usize },
}

impl SearchResult {
    /// Display names included in the reply.
    pub fn names(&self) -> &[String] {
        match self {
            SearchResult::NoResults => &[],
            SearchResult::Listed(names) => names,
            SearchResult::Sampled { shown, .. } => shown,
        }
    }

    /// Total number of matches, shown or not.
    pub fn total(&self) -> usize {
        match self {
            SearchResult::NoResults => 0,
            SearchResult::Listed(names) => names.len(),
            SearchResult::Sampled { shown, hidden } => shown.len() + hidden,
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchResult::NoResults => f.write_str("No Pokémon found."),
            SearchResult::Listed(names) => f.write_str(&names.join(", ")),
            SearchResult::Sampled { shown, hidden } => write!(
                f,
                "{}, and {} more. Redo the search with \"all\" as a search parameter to show all results.",
                shown.join(", "),
                hidden
            ),
        }
    }
}

/// Run a parsed query using the thread-local RNG for sampling.
pub fn search<C, L>(
    query: &ParsedQuery,
    catalog: &C,
    learnability: &L,
    opts: SearchOptions,
) -> Result<SearchResult, DexSearchError>
where
    C: CatalogProvider + ?Sized,
    L: Learnability + ?Sized,
{
    search_with_rng(query, catalog, learnability, opts, &mut rand::thread_rng())
}

/// Run a parsed query with an explicit RNG (deterministic in tests).
pub fn search_with_rng<C, L, R>(
    query: &ParsedQuery,
    catalog: &C,
    learnability: &L,
    opts: SearchOptions,
    rng: &mut R,
) -> Result<SearchResult, DexSearchError>
where
    C: CatalogProvider + ?Sized,
    L: Learnability + ?Sized,
    R: Rng + ?Sized,
{
    let matches = narrow(query, catalog, learnability)?;
    Ok(present(matches, query.show_all, opts.result_limit, rng))
}

/// Apply every category in turn and return the surviving species in catalog order.
pub fn narrow<'c, C, L>(
    query: &ParsedQuery,
    catalog: &'c C,
    learnability: &L,
) -> Result<Vec<&'c Species>, DexSearchError>
where
    C: CatalogProvider + ?Sized,
    L: Learnability + ?Sized,
{
    let initial = initial_set(catalog, query.wants_cap());
    debug!("dexsearch start: {} candidates for {}", initial.len(), query);

    query
        .categories
        .iter()
        .try_fold(initial, |working, category| -> Result<Vec<&'c Species>, DexSearchError> {
            let before = working.len();
            let next = apply_filter(working, category, catalog, learnability)?;
            debug!("dexsearch {}: {} -> {}", category.kind(), before, next.len());
            Ok(next)
        })
}

/// Legal species, leaving out CAP entries unless the CAP tier was requested.
fn initial_set<C: CatalogProvider + ?Sized>(catalog: &C, include_cap: bool) -> Vec<&Species> {
    catalog
        .all_entries()
        .iter()
        .filter(|s| s.is_legal() && (include_cap || !s.is_cap()))
        .collect()
}

fn apply_filter<'c, C, L>(
    working: Vec<&'c Species>,
    category: &FilterCategory,
    catalog: &C,
    learnability: &L,
) -> Result<Vec<&'c Species>, DexSearchError>
where
    C: CatalogProvider + ?Sized,
    L: Learnability + ?Sized,
{
    let kept = match category {
        FilterCategory::Type { types } => {
            working.into_iter().filter(|s| type_matches(s, types)).collect()
        }
        FilterCategory::Tier { tiers } => working
            .into_iter()
            .filter(|s| tiers.contains(&s.tier.to_lowercase()))
            .collect(),
        FilterCategory::Ability { abilities } => working
            .into_iter()
            .filter(|s| s.abilities.iter().any(|a| abilities.contains(&to_id(a))))
            .collect(),
        FilterCategory::Color { colors } => working
            .into_iter()
            .filter(|s| colors.contains(&s.color.to_lowercase()))
            .collect(),
        FilterCategory::Generation { gens } => {
            working.into_iter().filter(|s| gens.contains(&s.gen)).collect()
        }
        FilterCategory::Move { moves } => {
            let resolved = moves
                .iter()
                .map(|id| {
                    catalog
                        .lookup_move(id)
                        .ok_or_else(|| DexSearchError::UnknownMoveInFilter(id.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let ctx = LearnContext::default();
            working
                .into_iter()
                .filter(|s| {
                    resolved
                        .iter()
                        .all(|mv| learnability.check(mv, s, &ctx).is_learnable())
                })
                .collect()
        }
    };
    Ok(kept)
}

/// One requested type: either slot may match. Two requested types: both slots must be
/// covered, so single-typed species never match.
fn type_matches(species: &Species, types: &BTreeSet<String>) -> bool {
    let primary = types.contains(species.primary_type());
    match species.secondary_type() {
        Some(secondary) if types.len() == 1 => primary || types.contains(secondary),
        Some(secondary) => primary && types.contains(secondary),
        None => types.len() == 1 && primary,
    }
}

fn present<R: Rng + ?Sized>(
    matches: Vec<&Species>,
    show_all: bool,
    limit: usize,
    rng: &mut R,
) -> SearchResult {
    let mut names: Vec<String> = matches.into_iter().map(|s| s.name.clone()).collect();
    if names.is_empty() {
        return SearchResult::NoResults;
    }
    if show_all || names.len() <= limit {
        return SearchResult::Listed(names);
    }
    let hidden = names.len() - limit;
    let (sample, _) = names.partial_shuffle(rng, limit);
    SearchResult::Sampled {
        shown: sample.to_vec(),
        hidden,
    }
}
