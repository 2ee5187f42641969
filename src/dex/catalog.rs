//! Read-only species catalog.
//!
//! The catalog is loaded once from a JSON seed file (see [`Catalog::load`]) and
//! shared immutably by every search. Species keep the order they appear in the seed file;
//! that order is the stable enumeration order used for unsampled result lists.
//!
//! Seed format:
//!
//! ```json
//! {
//!   "types": ["Dragon", "Flying"],
//!   "moves": [{ "id": "dragondance", "name": "Dragon Dance", "type": "Dragon", "gen": 3 }],
//!   "abilities": [{ "id": "intimidate", "name": "Intimidate" }],
//!   "species": [{
//!     "id": "dragonite", "name": "Dragonite", "types": ["Dragon", "Flying"],
//!     "tier": "OU", "color": "Brown", "gen": 1,
//!     "abilities": ["Inner Focus", "Multiscale"],
//!     "prevo": "dragonair",
//!     "learnset": { "dragondance": ["5M", "4L55"] }
//!   }]
//! }
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::dex::errors::CatalogError;

/// Normalize a free-form name into a catalog identifier.
///
/// Lowercases and drops everything that is not an ASCII letter or digit, so
/// `"Dragon Dance"`, `"dragon-dance"` and `"DRAGONDANCE"` all map to `"dragondance"`.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One species record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    pub name: String,
    /// Primary type first; a second entry only for dual-typed species.
    pub types: Vec<String>,
    pub tier: String,
    pub color: String,
    pub gen: u8,
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Species this one evolves from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevo: Option<String>,
    /// Move id -> source codes (`<gen><kind>[detail]`, e.g. `5L20`, `4M`, `3E`).
    #[serde(default)]
    pub learnset: HashMap<String, Vec<String>>,
}

impl Species {
    pub fn primary_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or("")
    }

    pub fn secondary_type(&self) -> Option<&str> {
        self.types.get(1).map(String::as_str)
    }

    /// Legality flag: administratively excluded species carry the `Illegal` tier.
    pub fn is_legal(&self) -> bool {
        !self.tier.eq_ignore_ascii_case("illegal")
    }

    pub fn is_cap(&self) -> bool {
        self.tier.eq_ignore_ascii_case("cap")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub gen: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    pub name: String,
}

/// Lookup surface the parser and engine need from a species dataset.
///
/// The in-memory [`Catalog`] is the shipped implementation; tests and embedding servers
/// can provide their own.
pub trait CatalogProvider: Send + Sync {
    /// Every species, in stable enumeration order.
    fn all_entries(&self) -> &[Species];
    /// Resolve a move by free-form name.
    fn lookup_move(&self, name: &str) -> Option<&Move>;
    /// Resolve an ability by free-form name.
    fn lookup_ability(&self, name: &str) -> Option<&Ability>;
    /// Canonical (capitalized) names of all elemental types.
    fn known_types(&self) -> &BTreeSet<String>;
    /// Resolve a species by id.
    fn lookup_species(&self, id: &str) -> Option<&Species>;
}

#[derive(Debug, Deserialize)]
struct CatalogSeed {
    types: Vec<String>,
    #[serde(default)]
    moves: Vec<Move>,
    #[serde(default)]
    abilities: Vec<Ability>,
    #[serde(default)]
    species: Vec<Species>,
}

/// In-memory species catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    species: Vec<Species>,
    species_index: HashMap<String, usize>,
    moves: HashMap<String, Move>,
    abilities: HashMap<String, Ability>,
    types: BTreeSet<String>,
}

impl Catalog {
    /// Build a catalog from already-constructed records, validating cross references.
    pub fn new(
        types: Vec<String>,
        moves: Vec<Move>,
        abilities: Vec<Ability>,
        species: Vec<Species>,
    ) -> Result<Self, CatalogError> {
        let types: BTreeSet<String> = types.into_iter().collect();
        let moves: HashMap<String, Move> =
            moves.into_iter().map(|m| (to_id(&m.id), m)).collect();
        let abilities: HashMap<String, Ability> = abilities
            .into_iter()
            .map(|mut a| {
                a.id = to_id(&a.id);
                (a.id.clone(), a)
            })
            .collect();

        let mut species_index = HashMap::with_capacity(species.len());
        for (idx, s) in species.iter().enumerate() {
            if species_index.insert(to_id(&s.id), idx).is_some() {
                return Err(CatalogError::DuplicateSpecies(s.id.clone()));
            }
            if s.types.is_empty() || s.types.len() > 2 {
                return Err(CatalogError::BadTypeCount(s.id.clone()));
            }
            if let Some(bad) = s.types.iter().find(|t| !types.contains(*t)) {
                return Err(CatalogError::UnknownType {
                    species: s.id.clone(),
                    type_name: bad.clone(),
                });
            }
            if let Some(bad) = s.learnset.keys().find(|m| !moves.contains_key(&to_id(m))) {
                return Err(CatalogError::UnknownLearnsetMove {
                    species: s.id.clone(),
                    move_id: bad.clone(),
                });
            }
            if let Some(bad) = s.abilities.iter().find(|a| !abilities.contains_key(&to_id(a))) {
                return Err(CatalogError::UnknownAbility {
                    species: s.id.clone(),
                    ability: bad.clone(),
                });
            }
        }

        debug!(
            "catalog built: {} species, {} moves, {} abilities, {} types",
            species.len(),
            moves.len(),
            abilities.len(),
            types.len()
        );
        Ok(Catalog {
            species,
            species_index,
            moves,
            abilities,
            types,
        })
    }

    /// Parse a catalog from a JSON seed string.
    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        let seed: CatalogSeed = serde_json::from_str(contents)?;
        Catalog::new(seed.types, seed.moves, seed.abilities, seed.species)
    }

    /// Load a catalog from a JSON seed file.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let catalog = Catalog::from_json_str(&contents)?;
        info!(
            "Loaded catalog from {} ({} species)",
            path.display(),
            catalog.species.len()
        );
        Ok(catalog)
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// Distinct tier labels present, including `Illegal` and `CAP`.
    pub fn tier_labels(&self) -> BTreeSet<String> {
        self.species.iter().map(|s| s.tier.clone()).collect()
    }
}

impl CatalogProvider for Catalog {
    fn all_entries(&self) -> &[Species] {
        &self.species
    }

    fn lookup_move(&self, name: &str) -> Option<&Move> {
        self.moves.get(&to_id(name))
    }

    fn lookup_ability(&self, name: &str) -> Option<&Ability> {
        self.abilities.get(&to_id(name))
    }

    fn known_types(&self) -> &BTreeSet<String> {
        &self.types
    }

    fn lookup_species(&self, id: &str) -> Option<&Species> {
        self.species_index
            .get(&to_id(id))
            .and_then(|idx| self.species.get(*idx))
    }
}
