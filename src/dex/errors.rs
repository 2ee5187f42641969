use thiserror::Error;

use crate::dex::query::CategoryKind;

/// Query-scoped failures returned by [`parse`](crate::dex::query::parse) and
/// [`search`](crate::dex::search::search).
///
/// All of these are routine outcomes of free-text input. They are reported back to the
/// user verbatim and never affect catalog or process state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexSearchError {
    /// A token matched none of the search categories.
    #[error("\"{0}\" could not be found in any of the search categories.")]
    UnrecognizedToken(String),

    /// More distinct values were given for a category than it allows.
    #[error("specify at most {limit} of {category}")]
    CategoryCapExceeded { category: CategoryKind, limit: usize },

    /// `all` was the only thing in the query.
    #[error("no search parameters other than \"all\" were found")]
    ShowAllWithoutFilters,

    /// `all` was used in a query that would be broadcast to a whole room.
    #[error("a search with the parameter \"all\" cannot be broadcast")]
    ShowAllInBroadcast,

    /// The query contained no tokens at all.
    #[error("empty search query")]
    EmptyQuery,

    /// A move filter referenced a move the catalog cannot resolve.
    #[error("\"{0}\" is not a known move")]
    UnknownMoveInFilter(String),
}

/// Errors raised while loading a catalog seed file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrapper around IO errors (missing file, permissions).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json parse errors.
    #[error("catalog parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two species records share an id.
    #[error("duplicate species id: {0}")]
    DuplicateSpecies(String),

    /// A species lists a type missing from the type chart.
    #[error("species {species} has unknown type {type_name}")]
    UnknownType { species: String, type_name: String },

    /// A species declares zero or more than two types.
    #[error("species {0} must have one or two types")]
    BadTypeCount(String),

    /// A learnset references a move that is not in the move table.
    #[error("species {species} learnset references unknown move {move_id}")]
    UnknownLearnsetMove { species: String, move_id: String },

    /// A species lists an ability that is not in the ability table.
    #[error("species {species} has unknown ability {ability}")]
    UnknownAbility { species: String, ability: String },
}
