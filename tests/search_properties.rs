//! End-to-end search behavior against the fixture catalog.
use dexsearch::dex::{
    narrow, parse, CatalogProvider, search, search_with_rng, DexSearchError, LearnsetTable, SearchOptions,
    SearchResult,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

mod common;
use common::{fixture_catalog, names};

fn result_set(query: &str) -> BTreeSet<String> {
    let catalog = fixture_catalog();
    let table = LearnsetTable::new(&catalog);
    let parsed = parse(query, &catalog).expect("parse");
    names(narrow(&parsed, &catalog, &table).expect("narrow"))
        .into_iter()
        .collect()
}

#[test]
fn fifteen_matches_are_sampled_down_to_ten() {
    let catalog = fixture_catalog();
    let table = LearnsetTable::new(&catalog);
    let query = parse("surf, 1", &catalog).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let result = search_with_rng(&query, &catalog, &table, SearchOptions::default(), &mut rng).unwrap();

    match &result {
        SearchResult::Sampled { shown, hidden } => {
            assert_eq!(shown.len(), 10);
            assert_eq!(*hidden, 5);
            let unique: BTreeSet<_> = shown.iter().collect();
            assert_eq!(unique.len(), 10, "sample must not repeat names: {:?}", shown);
        }
        other => panic!("expected sampled result, got {:?}", other),
    }
    assert!(result.to_string().contains("and 5 more"));
    assert_eq!(result.total(), 15);
}

#[test]
fn show_all_lists_every_match_in_catalog_order() {
    let catalog = fixture_catalog();
    let table = LearnsetTable::new(&catalog);
    let query = parse("surf, 1, all", &catalog).unwrap();
    let result = search(&query, &catalog, &table, SearchOptions::default()).unwrap();

    let text = result.to_string();
    assert!(!text.contains("more."));
    assert_eq!(result.names().len(), 15);
    assert_eq!(result.names()[0], "Squirtle");
    assert_eq!(result.names()[14], "Starmie");
}

#[test]
fn small_result_sets_are_listed_deterministically() {
    let catalog = fixture_catalog();
    let table = LearnsetTable::new(&catalog);
    let query = parse("dragon type, ou", &catalog).unwrap();
    let first = search(&query, &catalog, &table, SearchOptions::default()).unwrap();
    let second = search(&query, &catalog, &table, SearchOptions::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), "Dragonite, Latios, Garchomp");
}

#[test]
fn repeated_sampled_queries_yield_the_same_set_of_matches() {
    let catalog = fixture_catalog();
    let table = LearnsetTable::new(&catalog);
    let query = parse("water type", &catalog).unwrap();
    let everything: BTreeSet<String> = result_set("water type, all");
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result =
            search_with_rng(&query, &catalog, &table, SearchOptions::default(), &mut rng).unwrap();
        assert_eq!(result.total(), everything.len());
        assert!(result.names().iter().all(|n| everything.contains(n)));
    }
}

#[test]
fn intersection_is_independent_of_token_order() {
    assert_eq!(result_set("fire type, nu"), result_set("nu, fire type"));
    assert_eq!(
        result_set("earthquake, dragon type, ou"),
        result_set("ou, earthquake, dragon type")
    );
    assert_eq!(result_set("blue, 1, lc"), result_set("lc, blue, 1"));
}

#[test]
fn single_category_results_follow_that_rule_alone() {
    let catalog = fixture_catalog();
    let blue: BTreeSet<String> = catalog
        .all_entries()
        .iter()
        .filter(|s| s.is_legal() && !s.is_cap() && s.color == "Blue")
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(result_set("blue"), blue);
}

#[test]
fn prevo_moves_count_for_evolutions() {
    let set = result_set("extreme speed");
    assert!(set.contains("Dragonite"), "Dragonite inherits Extreme Speed: {:?}", set);
    assert!(set.contains("Dratini"));
    assert!(set.contains("Rayquaza"));
}

#[test]
fn cap_and_illegal_species() {
    assert!(!result_set("water type, flying type").contains("Missingno."));
    assert!(!result_set("ice type").contains("Syclant"));
    assert_eq!(
        result_set("ice type, cap"),
        ["Syclant".to_string()].into_iter().collect()
    );
}

#[test]
fn zero_matches_is_not_an_error() {
    let catalog = fixture_catalog();
    let table = LearnsetTable::new(&catalog);
    let query = parse("ghost type", &catalog).unwrap();
    assert_eq!(
        search(&query, &catalog, &table, SearchOptions::default()),
        Ok(SearchResult::NoResults)
    );
}

#[test]
fn unrecognized_token_abandons_query() {
    let catalog = fixture_catalog();
    assert_eq!(
        parse("water type, foobar, 1", &catalog),
        Err(DexSearchError::UnrecognizedToken("foobar".into()))
    );
}
