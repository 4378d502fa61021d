//! Report structures for a screening run

use crate::processing::screening::{DocumentOutcome, DocumentReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything produced by one screening run, ready for formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub summary: ScreeningSummary,
    pub job: JobSummary,
    /// Per-document results, in the order the documents were supplied
    pub documents: Vec<DocumentReport>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub total: usize,
    pub scored: usize,
    pub skipped: usize,
    pub failed: usize,
    pub best_match: Option<String>,
    pub best_score: Option<u8>,
    pub average_score: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    /// File path, or "pasted text"
    pub source: String,
    pub word_count: usize,
    pub keyword_count: usize,
    pub title: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    pub algorithm: String,
    pub processing_time_ms: u64,
}

impl ScreeningReport {
    pub fn new(
        documents: Vec<DocumentReport>,
        job: JobSummary,
        algorithm: String,
        processing_time_ms: u64,
    ) -> Self {
        let summary = Self::create_summary(&documents);

        Self {
            summary,
            job,
            documents,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
                algorithm,
                processing_time_ms,
            },
        }
    }

    fn create_summary(documents: &[DocumentReport]) -> ScreeningSummary {
        let mut skipped = 0;
        let mut failed = 0;
        for doc in documents {
            match doc.outcome {
                DocumentOutcome::Skipped { .. } => skipped += 1,
                DocumentOutcome::Failed { .. } => failed += 1,
                DocumentOutcome::Scored { .. } => {}
            }
        }

        let scores: Vec<u8> = documents.iter().filter_map(DocumentReport::score).collect();
        let average_score = if scores.is_empty() {
            None
        } else {
            let total: u32 = scores.iter().map(|&s| s as u32).sum();
            Some((total as f64 / scores.len() as f64).round() as u8)
        };

        // First document wins ties
        let best = documents
            .iter()
            .filter_map(|doc| doc.score().map(|score| (doc, score)))
            .fold(None::<(&DocumentReport, u8)>, |best, (doc, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((doc, score)),
            });

        ScreeningSummary {
            total: documents.len(),
            scored: scores.len(),
            skipped,
            failed,
            best_match: best.map(|(doc, _)| doc.file_name.clone()),
            best_score: best.map(|(_, score)| score),
            average_score,
        }
    }

    /// Scored documents from best to worst; equal scores keep input order
    pub fn ranked(&self) -> Vec<&DocumentReport> {
        let mut scored: Vec<&DocumentReport> =
            self.documents.iter().filter(|doc| doc.score().is_some()).collect();
        scored.sort_by(|a, b| b.score().cmp(&a.score()));
        scored
    }
}

/// One-line verdict for a match score
pub fn verdict(score: u8) -> &'static str {
    match score {
        90..=100 => "Excellent match",
        75..=89 => "Strong match",
        60..=74 => "Moderate match",
        40..=59 => "Weak match",
        _ => "Poor match",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::extras::MatchExtras;
    use crate::processing::text_matcher::MatchResult;

    fn scored(name: &str, score: u8) -> DocumentReport {
        DocumentReport {
            file_name: name.to_string(),
            path: name.to_string(),
            outcome: DocumentOutcome::Scored {
                result: MatchResult {
                    score,
                    shared_keywords: Default::default(),
                },
                extras: MatchExtras::default(),
                word_count: 10,
            },
        }
    }

    fn job() -> JobSummary {
        JobSummary {
            source: "pasted text".to_string(),
            word_count: 5,
            keyword_count: 3,
            title: None,
            location: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let documents = vec![
            scored("a.pdf", 40),
            DocumentReport {
                file_name: "notes.txt".to_string(),
                path: "notes.txt".to_string(),
                outcome: DocumentOutcome::Skipped {
                    reason: "not a PDF or DOCX file".to_string(),
                },
            },
            scored("b.docx", 81),
            scored("c.pdf", 81),
            DocumentReport {
                file_name: "broken.pdf".to_string(),
                path: "broken.pdf".to_string(),
                outcome: DocumentOutcome::Failed {
                    error: "bad xref".to_string(),
                },
            },
        ];

        let report = ScreeningReport::new(documents, job(), "indel".to_string(), 3);

        assert_eq!(report.summary.total, 5);
        assert_eq!(report.summary.scored, 3);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.best_match.as_deref(), Some("b.docx"));
        assert_eq!(report.summary.average_score, Some(67));

        let ranked: Vec<&str> = report.ranked().iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(ranked, vec!["b.docx", "c.pdf", "a.pdf"]);
    }

    #[test]
    fn test_empty_report() {
        let report = ScreeningReport::new(Vec::new(), job(), "indel".to_string(), 0);
        assert_eq!(report.summary.best_score, None);
        assert_eq!(report.summary.average_score, None);
        assert!(report.ranked().is_empty());
    }

    #[test]
    fn test_verdict() {
        assert_eq!(verdict(100), "Excellent match");
        assert_eq!(verdict(68), "Moderate match");
        assert_eq!(verdict(0), "Poor match");
    }
}
