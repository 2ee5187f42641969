//! Move learnability checks.
//!
//! The search engine treats learnability as an opaque predicate behind the
//! [`Learnability`] trait. [`LearnsetTable`] is the default implementation backed by the
//! per-species learnsets stored in the catalog.
//!
//! Source codes follow the `<gen><kind>[detail]` convention:
//! - `5L20` level-up in gen 5 at level 20
//! - `4M` TM/HM in gen 4
//! - `3T` move tutor in gen 3
//! - `5E` egg move in gen 5
//! - `5S` event distribution in gen 5
//! - `5D` Dream World in gen 5

use log::trace;

use crate::dex::catalog::{to_id, CatalogProvider, Move, Species};

/// Restrictions applied while checking a move. The default is unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearnContext {
    /// Species level cap; level-up sources above it do not count.
    pub level: Option<u8>,
    /// Newest generation whose sources count.
    pub max_gen: Option<u8>,
}

/// Outcome of a learnability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearnVerdict {
    Learnable,
    Blocked(String),
}

impl LearnVerdict {
    pub fn is_learnable(&self) -> bool {
        matches!(self, LearnVerdict::Learnable)
    }
}

/// Answers whether a species can learn a move.
pub trait Learnability: Send + Sync {
    fn check(&self, mv: &Move, species: &Species, ctx: &LearnContext) -> LearnVerdict;
}

/// How a single learnset source code unpacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Source {
    gen: u8,
    kind: char,
    level: Option<u8>,
}

fn parse_source(code: &str) -> Option<Source> {
    let mut chars = code.chars();
    let gen = chars.next()?.to_digit(10)? as u8;
    let kind = chars.next()?;
    let rest: String = chars.collect();
    let level = if kind == 'L' { rest.parse().ok() } else { None };
    Some(Source { gen, kind, level })
}

fn source_allowed(source: &Source, ctx: &LearnContext) -> bool {
    if let Some(max_gen) = ctx.max_gen {
        if source.gen > max_gen {
            return false;
        }
    }
    match (source.level, ctx.level) {
        (Some(learn_at), Some(cap)) => learn_at <= cap,
        _ => true,
    }
}

/// Learnset-backed [`Learnability`] that also follows the pre-evolution chain.
pub struct LearnsetTable<'a, C: CatalogProvider + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: CatalogProvider + ?Sized> LearnsetTable<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    fn learns_directly(&self, species: &Species, move_id: &str, ctx: &LearnContext) -> bool {
        species
            .learnset
            .iter()
            .filter(|(id, _)| to_id(id) == move_id)
            .flat_map(|(_, sources)| sources.iter())
            .filter_map(|code| parse_source(code))
            .any(|src| source_allowed(&src, ctx))
    }
}

impl<C: CatalogProvider + ?Sized> Learnability for LearnsetTable<'_, C> {
    fn check(&self, mv: &Move, species: &Species, ctx: &LearnContext) -> LearnVerdict {
        let move_id = to_id(&mv.id);
        let mut current = Some(species);
        // Prevo chains are at most a few links; stop on cycles in bad data.
        let mut hops = 0;
        while let Some(s) = current {
            if self.learns_directly(s, &move_id, ctx) {
                trace!("{} learns {} via {}", species.id, move_id, s.id);
                return LearnVerdict::Learnable;
            }
            hops += 1;
            if hops > 8 {
                break;
            }
            current = s
                .prevo
                .as_deref()
                .and_then(|p| self.catalog.lookup_species(p));
        }
        LearnVerdict::Blocked(format!("{} can't learn {}", species.name, mv.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"{
            "types": ["Dragon", "Flying"],
            "moves": [
                { "id": "dragondance", "name": "Dragon Dance" },
                { "id": "extremespeed", "name": "Extreme Speed" },
                { "id": "hurricane", "name": "Hurricane" }
            ],
            "species": [
                { "id": "dratini", "name": "Dratini", "types": ["Dragon"], "tier": "LC",
                  "color": "Blue", "gen": 1, "learnset": { "extremespeed": ["4S"], "dragondance": ["5L55"] } },
                { "id": "dragonite", "name": "Dragonite", "types": ["Dragon", "Flying"],
                  "tier": "OU", "color": "Brown", "gen": 1, "prevo": "dratini",
                  "learnset": { "hurricane": ["5L81"] } }
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn parses_source_codes() {
        assert_eq!(parse_source("5L20"), Some(Source { gen: 5, kind: 'L', level: Some(20) }));
        assert_eq!(parse_source("4M"), Some(Source { gen: 4, kind: 'M', level: None }));
        assert_eq!(parse_source(""), None);
        assert_eq!(parse_source("X"), None);
    }

    #[test]
    fn inherits_from_prevo() {
        let cat = catalog();
        let table = LearnsetTable::new(&cat);
        let dnite = cat.lookup_species("dragonite").unwrap();
        let es = cat.lookup_move("extremespeed").unwrap();
        assert!(table.check(es, dnite, &LearnContext::default()).is_learnable());
    }

    #[test]
    fn level_and_gen_restrictions() {
        let cat = catalog();
        let table = LearnsetTable::new(&cat);
        let dnite = cat.lookup_species("dragonite").unwrap();
        let hurricane = cat.lookup_move("hurricane").unwrap();
        let es = cat.lookup_move("extremespeed").unwrap();

        let low = LearnContext { level: Some(50), max_gen: None };
        assert!(!table.check(hurricane, dnite, &low).is_learnable());

        let gen3 = LearnContext { level: None, max_gen: Some(3) };
        assert_eq!(
            table.check(es, dnite, &gen3),
            LearnVerdict::Blocked("Dragonite can't learn Extreme Speed".into())
        );
    }
}
