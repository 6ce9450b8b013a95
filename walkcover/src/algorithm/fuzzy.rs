use itertools::Itertools;
use std::collections::BTreeSet;

/// string similarity in [0, 100] based on normalized edit distance.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// similarity of the two strings after sorting their whitespace tokens,
/// making the score order-insensitive ("school chapman" vs "chapman school").
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// similarity that discounts tokens common to both strings, so a query
/// that is a subset of a longer name still scores highly.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    let common: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let common_str = common.iter().join(" ");
    let combined_a = join_nonempty(&common_str, &only_a.iter().join(" "));
    let combined_b = join_nonempty(&common_str, &only_b.iter().join(" "));

    [
        ratio(&common_str, &combined_a),
        ratio(&common_str, &combined_b),
        ratio(&combined_a, &combined_b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// weighted-ratio composite score in [0, 100]: the plain ratio, with the
/// token-order-insensitive variants downweighted at 0.95.
pub fn wratio(a: &str, b: &str) -> f64 {
    let base = ratio(a, b);
    let sorted = token_sort_ratio(a, b) * 0.95;
    let set = token_set_ratio(a, b) * 0.95;
    base.max(sorted).max(set)
}

fn sorted_tokens(s: &str) -> String {
    s.split_whitespace().sorted().join(" ")
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{a} {b}"),
    }
}
