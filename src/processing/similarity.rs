//! String similarity ratios and token-set comparison

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use strsim::{jaro_winkler, normalized_levenshtein};

/// Character-level similarity used underneath the token-set comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimilarityAlgorithm {
    /// `2 * LCS / (|a| + |b|)`, the classic fuzzy matching ratio
    #[default]
    Indel,
    NormalizedLevenshtein,
    JaroWinkler,
}

impl std::fmt::Display for SimilarityAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityAlgorithm::Indel => write!(f, "indel"),
            SimilarityAlgorithm::NormalizedLevenshtein => write!(f, "levenshtein"),
            SimilarityAlgorithm::JaroWinkler => write!(f, "jaro-winkler"),
        }
    }
}

fn non_word_regex() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"\W").expect("Invalid non-word regex"))
}

/// Replace every non-word character with a space, lowercase, and trim
pub fn normalize(text: &str) -> String {
    non_word_regex()
        .replace_all(text, " ")
        .to_lowercase()
        .trim()
        .to_string()
}

/// Similarity of two strings in `[0.0, 1.0]`
pub fn similarity(algorithm: SimilarityAlgorithm, a: &str, b: &str) -> f64 {
    // Canonical argument order keeps greedy Jaro matching symmetric
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    match algorithm {
        SimilarityAlgorithm::Indel => indel_similarity(a, b),
        SimilarityAlgorithm::NormalizedLevenshtein => normalized_levenshtein(a, b),
        SimilarityAlgorithm::JaroWinkler => jaro_winkler(a, b),
    }
}

/// Similarity scaled to 0..=100, rounding half to even
pub fn ratio(algorithm: SimilarityAlgorithm, a: &str, b: &str) -> u8 {
    to_percent(similarity(algorithm, a, b))
}

fn to_percent(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round_ties_even() as u8
}

fn indel_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * longest_common_subsequence(&a, &b)) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    // Iterate the longer side in the outer loop so the row stays short
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut previous = vec![0usize; inner.len() + 1];
    let mut current = vec![0usize; inner.len() + 1];

    for &oc in outer {
        for (j, &ic) in inner.iter().enumerate() {
            current[j + 1] = if oc == ic {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[inner.len()]
}

/// Token-set ratio: compares the sorted shared tokens against each side's
/// shared-plus-remainder string and keeps the best of the three pairings.
pub fn token_set_ratio(algorithm: SimilarityAlgorithm, a: &str, b: &str) -> u8 {
    if !a.is_empty() && a == b {
        return 100;
    }

    let normalized_a = normalize(a);
    let normalized_b = normalize(b);
    if normalized_a.is_empty() || normalized_b.is_empty() {
        return 0;
    }

    let tokens_a: BTreeSet<&str> = normalized_a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = normalized_b.split_whitespace().collect();

    let intersection = join_tokens(tokens_a.intersection(&tokens_b));
    let only_a = join_tokens(tokens_a.difference(&tokens_b));
    let only_b = join_tokens(tokens_b.difference(&tokens_a));

    let combined_a = format!("{} {}", intersection, only_a).trim().to_string();
    let combined_b = format!("{} {}", intersection, only_b).trim().to_string();

    [
        ratio(algorithm, &intersection, &combined_a),
        ratio(algorithm, &intersection, &combined_b),
        ratio(algorithm, &combined_a, &combined_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn join_tokens<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}
