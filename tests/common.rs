//! Test utilities & fixtures.
//! Provides access to the integration catalog under `tests/test-data-int`.

use std::path::{Path, PathBuf};

use dexsearch::dex::Catalog;

/// Return the path to the static integration test fixture directory.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-data-int")
}

/// Path of the fixture catalog seed file.
#[allow(dead_code)]
pub fn catalog_path() -> PathBuf {
    fixture_root().join("catalog.json")
}

/// Load the fixture catalog (30 species, gens 1-4, including one Illegal and one CAP entry).
pub fn fixture_catalog() -> Catalog {
    let seed = std::fs::read_to_string(catalog_path()).expect("fixture catalog");
    Catalog::from_json_str(&seed).expect("fixture catalog")
}

/// Collect display names so assertions read naturally.
#[allow(dead_code)] // not every test binary uses this helper
pub fn names<'a, I>(species: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a dexsearch::dex::Species>,
{
    species.into_iter().map(|s| s.name.clone()).collect()
}
