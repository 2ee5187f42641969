//! Chat surface: prefixes, broadcast policy and reply text.
use std::sync::Arc;

use dexsearch::chat::{DexCommandHandler, Reply};
use dexsearch::config::Config;

mod common;
use common::{catalog_path, fixture_catalog};

fn handler_with(config: &Config) -> DexCommandHandler {
    DexCommandHandler::new(Arc::new(fixture_catalog()), config)
}

#[test]
fn cap_messages_match_server_wording() {
    let h = handler_with(&Config::default());
    let reply = h
        .handle_message("/dexsearch dragon dance, earthquake, roost, outrage, surf")
        .unwrap();
    assert_eq!(reply.text, "Specify a maximum of 4 moves.");
    let reply = h.handle_message("/dexsearch levitate, intimidate").unwrap();
    assert_eq!(reply.text, "Specify only one ability.");
    let reply = h
        .handle_message("/dexsearch fire type, water type, grass type")
        .unwrap();
    assert_eq!(reply.text, "Specify a maximum of two types.");
}

#[test]
fn large_broadcast_is_sampled() {
    let h = handler_with(&Config::default());
    let reply = h.handle_message("!dexsearch surf, 1").unwrap();
    assert!(reply.broadcast);
    assert!(reply.text.ends_with(
        "and 5 more. Redo the search with \"all\" as a search parameter to show all results."
    ));
}

#[test]
fn broadcast_show_all_can_be_enabled() {
    let mut config = Config::default();
    config.search.allow_broadcast_show_all = true;
    let h = handler_with(&config);
    let reply = h.handle_message("!dexsearch surf, 1, all").unwrap();
    assert!(reply.broadcast);
    assert_eq!(reply.text.split(", ").count(), 15);
}

#[test]
fn result_limit_comes_from_config() {
    let mut config = Config::default();
    config.search.result_limit = 3;
    let h = handler_with(&config);
    let reply = h.handle_message("/dexsearch dragon type, ou").unwrap();
    assert_eq!(reply.text, "Dragonite, Latios, Garchomp");
    let reply = h.handle_message("/dexsearch dragon type").unwrap();
    assert!(reply.text.contains("more."), "got {}", reply.text);
}

#[test]
fn no_results_reply() {
    let h = handler_with(&Config::default());
    assert_eq!(
        h.handle_message("/dexsearch ghost type"),
        Some(Reply { text: "No Pokémon found.".into(), broadcast: false })
    );
}

#[test]
fn help_command_lists_categories() {
    let h = handler_with(&Config::default());
    let reply = h.handle_message("/help dexsearch").unwrap();
    assert!(reply.text.contains("Search categories are: type, tier, color, moves, ability, gen."));
    let reply = h.handle_message("/help weather").unwrap();
    assert!(reply.text.starts_with("Help for \"weather\" is not available."));
}

#[tokio::test]
async fn handler_loads_catalog_from_config() {
    let mut config = Config::default();
    config.catalog.path = catalog_path().to_string_lossy().to_string();
    let h = DexCommandHandler::from_config(&config).await.expect("handler");
    assert_eq!(h.catalog().species_count(), 30);

    config.catalog.path = "does/not/exist.json".to_string();
    assert!(DexCommandHandler::from_config(&config).await.is_err());
}
