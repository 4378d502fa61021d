//! Optional match details: job title, location, missing and near-miss keywords

use crate::processing::similarity::token_set_ratio;
use crate::processing::text_matcher::TextMatcher;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strsim::jaro_winkler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleMatch {
    pub title: String,
    /// 100 when every title word appears in the resume
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatch {
    pub requested: String,
    pub found_in_resume: bool,
    /// Known locations mentioned anywhere in the resume, sorted
    pub resume_locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMiss {
    pub job_keyword: String,
    pub resume_keyword: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordGaps {
    /// Job keywords absent from the resume, sorted
    pub missing: Vec<String>,
    pub near_misses: Vec<NearMiss>,
}

/// Extra details evaluated alongside the match score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchExtras {
    pub title: Option<TitleMatch>,
    pub location: Option<LocationMatch>,
    pub gaps: KeywordGaps,
}

pub fn match_title(matcher: &TextMatcher, title: &str, resume_text: &str) -> TitleMatch {
    TitleMatch {
        title: title.trim().to_string(),
        score: token_set_ratio(matcher.algorithm(), title, resume_text),
    }
}

/// Whole-word, case-insensitive search for a configurable list of locations
pub struct LocationMatcher {
    locations: Vec<String>,
    searcher: Option<AhoCorasick>,
}

impl LocationMatcher {
    pub fn new(known_locations: &[String]) -> Self {
        let locations: Vec<String> = known_locations
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        let searcher = if locations.is_empty() {
            None
        } else {
            AhoCorasickBuilder::new()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::LeftmostLongest)
                .build(&locations)
                .map_err(|e| log::warn!("Could not build location matcher: {}", e))
                .ok()
        };

        Self { locations, searcher }
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Known locations that appear in the text as whole words
    pub fn find_locations(&self, text: &str) -> Vec<String> {
        let Some(searcher) = &self.searcher else {
            return Vec::new();
        };

        let found: BTreeSet<String> = searcher
            .find_iter(text)
            .filter(|m| is_whole_word(text, m.start(), m.end()))
            .map(|m| self.locations[m.pattern().as_usize()].clone())
            .collect();

        found.into_iter().collect()
    }

    pub fn match_location(&self, requested: &str, resume_text: &str) -> LocationMatch {
        let requested = requested.trim();
        let found_in_resume = !requested.is_empty() && contains_word(resume_text, requested);

        LocationMatch {
            requested: requested.to_string(),
            found_in_resume,
            resume_locations: self.find_locations(resume_text),
        }
    }
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    haystack
        .match_indices(&needle)
        .any(|(start, m)| is_whole_word(&haystack, start, start + m.len()))
}

/// Job keywords the resume lacks, plus close spellings the resume does have
pub fn keyword_gaps(
    matcher: &TextMatcher,
    resume_text: &str,
    job_text: &str,
    fuzzy_threshold: f32,
) -> KeywordGaps {
    let resume_keywords = matcher.extract_keywords(resume_text);
    let job_keywords = matcher.extract_keywords(job_text);

    let missing: Vec<String> = job_keywords.difference(&resume_keywords).cloned().collect();

    let near_misses = missing
        .iter()
        .filter_map(|job_keyword| {
            resume_keywords
                .iter()
                .map(|resume_keyword| (resume_keyword, jaro_winkler(job_keyword, resume_keyword) as f32))
                .filter(|(_, similarity)| *similarity >= fuzzy_threshold)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(resume_keyword, similarity)| NearMiss {
                    job_keyword: job_keyword.clone(),
                    resume_keyword: resume_keyword.clone(),
                    similarity,
                })
        })
        .collect();

    KeywordGaps { missing, near_misses }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<String> {
        ["Pune", "Mumbai", "New Delhi", "Delhi"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_match() {
        let matcher = TextMatcher::default();
        let resume = "Jane Roe. Senior Backend Developer at Acme, building Java services.";

        assert_eq!(match_title(&matcher, "Backend Developer", resume).score, 100);
        assert!(match_title(&matcher, "Data Scientist", resume).score < 100);
    }

    #[test]
    fn test_location_matching() {
        let matcher = LocationMatcher::new(&cities());
        let resume = "Based in PUNE, previously worked in New Delhi and Mumbaikar circles.";

        let result = matcher.match_location("pune", resume);
        assert!(result.found_in_resume);
        assert_eq!(result.resume_locations, vec!["New Delhi".to_string(), "Pune".to_string()]);

        let result = matcher.match_location("Mumbai", resume);
        assert!(!result.found_in_resume);
    }

    #[test]
    fn test_empty_location_list() {
        let matcher = LocationMatcher::new(&[]);
        assert_eq!(matcher.location_count(), 0);
        assert!(matcher.find_locations("Pune").is_empty());
        assert!(matcher.match_location("Pune", "Lives in Pune").found_in_resume);
    }

    #[test]
    fn test_keyword_gaps() {
        let matcher = TextMatcher::default();
        let gaps = keyword_gaps(
            &matcher,
            "Java developers with Spring experience",
            "Java developer, Spring, Kubernetes",
            0.9,
        );

        assert_eq!(gaps.missing, vec!["developer".to_string(), "kubernetes".to_string()]);
        assert_eq!(gaps.near_misses.len(), 1);
        assert_eq!(gaps.near_misses[0].job_keyword, "developer");
        assert_eq!(gaps.near_misses[0].resume_keyword, "developers");
    }
}
