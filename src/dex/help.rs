//! Help text for the species search command.

use crate::dex::query::{COLOR_LABELS, TIER_LABELS};

/// Lines shown for `help dexsearch` or a bare `dexsearch`.
///
/// `prefix` is the command prefix the user typed (e.g. `/`), so examples read naturally.
pub fn dexsearch_help(prefix: &str) -> Vec<String> {
    let tiers: Vec<String> = TIER_LABELS
        .iter()
        .filter(|t| **t != "limbo")
        .map(|t| t.to_uppercase())
        .collect();
    vec![
        format!(
            "{}dexsearch [type], [move], [move], ... - Searches for Pokemon that fulfill the selected criteria.",
            prefix
        ),
        "Search categories are: type, tier, color, moves, ability, gen.".to_string(),
        format!("Valid colors are: {}.", join_with_and(&COLOR_LABELS)),
        format!("Valid tiers are: {}.", tiers.join("/")),
        "Types must be followed by \" type\", e.g., \"dragon type\".".to_string(),
        "Add \"all\" to list every result instead of a random 10.".to_string(),
        "The order of the parameters does not matter.".to_string(),
    ]
}

fn join_with_and(items: &[&str]) -> String {
    match items.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}
