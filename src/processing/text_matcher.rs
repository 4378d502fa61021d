//! Keyword extraction and match scoring between a resume and a job description

use crate::processing::similarity::{token_set_ratio, SimilarityAlgorithm};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of comparing one resume against one job description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Token-set similarity, 0..=100
    pub score: u8,
    /// Keywords present in both texts, sorted
    pub shared_keywords: BTreeSet<String>,
}

/// Pure text matcher. Holds no state besides its configuration, so the same
/// inputs always produce the same keywords and score.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    algorithm: SimilarityAlgorithm,
    keyword_regex: Regex,
}

impl Default for TextMatcher {
    fn default() -> Self {
        Self::new(SimilarityAlgorithm::default())
    }
}

impl TextMatcher {
    pub fn new(algorithm: SimilarityAlgorithm) -> Self {
        let keyword_regex = Regex::new(r"\b\w{4,}\b").expect("Invalid keyword regex");

        Self {
            algorithm,
            keyword_regex,
        }
    }

    pub fn algorithm(&self) -> SimilarityAlgorithm {
        self.algorithm
    }

    /// Lowercase the text and collect every word of four or more characters
    pub fn extract_keywords(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        self.keyword_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Token-set similarity between two texts, 0..=100
    pub fn score(&self, text_a: &str, text_b: &str) -> u8 {
        token_set_ratio(self.algorithm, text_a, text_b)
    }

    pub fn shared_keywords(&self, text_a: &str, text_b: &str) -> BTreeSet<String> {
        let keywords_a = self.extract_keywords(text_a);
        let keywords_b = self.extract_keywords(text_b);
        keywords_a.intersection(&keywords_b).cloned().collect()
    }

    /// Score and shared keywords in one pass
    pub fn compare(&self, resume_text: &str, job_text: &str) -> MatchResult {
        MatchResult {
            score: self.score(resume_text, job_text),
            shared_keywords: self.shared_keywords(resume_text, job_text),
        }
    }
}
