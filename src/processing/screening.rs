//! Batch screening of resumes against a single job description

use crate::config::{Config, FieldsConfig};
use crate::error::{Result, ScreenerError};
use crate::input::manager::InputManager;
use crate::processing::extras::{keyword_gaps, match_title, LocationMatcher, MatchExtras};
use crate::processing::text_matcher::{MatchResult, TextMatcher};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional fields supplied alongside the job description
#[derive(Debug, Clone, Default)]
pub struct ScreeningOptions {
    pub job_title: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Scored {
        result: MatchResult,
        extras: MatchExtras,
        word_count: usize,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub file_name: String,
    pub path: String,
    pub outcome: DocumentOutcome,
}

impl DocumentReport {
    pub fn score(&self) -> Option<u8> {
        match &self.outcome {
            DocumentOutcome::Scored { result, .. } => Some(result.score),
            _ => None,
        }
    }
}

/// Runs every resume through extraction and matching. Each document is
/// independent: a skip or failure never stops the rest of the batch.
pub struct Screener {
    matcher: TextMatcher,
    location_matcher: LocationMatcher,
    fields: FieldsConfig,
    fuzzy_threshold: f32,
    input_manager: InputManager,
}

impl Screener {
    pub fn new(config: &Config) -> Self {
        Self {
            matcher: TextMatcher::new(config.matching.algorithm),
            location_matcher: LocationMatcher::new(&config.fields.known_locations),
            fields: config.fields.clone(),
            fuzzy_threshold: config.matching.fuzzy_threshold,
            input_manager: InputManager::new(),
        }
    }

    pub fn matcher(&self) -> &TextMatcher {
        &self.matcher
    }

    pub async fn screen(
        &mut self,
        job_text: &str,
        resumes: &[PathBuf],
        options: &ScreeningOptions,
    ) -> Result<Vec<DocumentReport>> {
        self.screen_with_progress(job_text, resumes, options, |_| {}).await
    }

    /// Screen the batch, calling `on_document` after each document finishes
    pub async fn screen_with_progress<F>(
        &mut self,
        job_text: &str,
        resumes: &[PathBuf],
        options: &ScreeningOptions,
        mut on_document: F,
    ) -> Result<Vec<DocumentReport>>
    where
        F: FnMut(&DocumentReport),
    {
        if resumes.is_empty() {
            return Err(ScreenerError::MissingInput(
                "Please upload at least one resume".to_string(),
            ));
        }
        if job_text.trim().is_empty() {
            return Err(ScreenerError::MissingInput(
                "Please enter a job description".to_string(),
            ));
        }

        info!("Screening {} resume(s)", resumes.len());
        let mut reports = Vec::with_capacity(resumes.len());

        for path in resumes {
            let outcome = self.screen_document(path, job_text, options).await;
            let report = DocumentReport {
                file_name: display_name(path),
                path: path.to_string_lossy().to_string(),
                outcome,
            };
            on_document(&report);
            reports.push(report);
        }

        Ok(reports)
    }

    async fn screen_document(
        &mut self,
        path: &Path,
        job_text: &str,
        options: &ScreeningOptions,
    ) -> DocumentOutcome {
        match self.input_manager.extract_resume_text(path).await {
            Ok(resume_text) => {
                if resume_text.trim().is_empty() {
                    warn!("No text could be extracted from {}", path.display());
                }
                let (result, extras) = self.evaluate(&resume_text, job_text, options);
                debug!("{}: score {}", path.display(), result.score);
                DocumentOutcome::Scored {
                    result,
                    extras,
                    word_count: resume_text.split_whitespace().count(),
                }
            }
            Err(ScreenerError::UnsupportedFormat(reason)) => {
                warn!("Skipping {}: {}", path.display(), reason);
                DocumentOutcome::Skipped { reason }
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                DocumentOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Score one resume text, plus whichever extra fields are enabled
    pub fn evaluate(
        &self,
        resume_text: &str,
        job_text: &str,
        options: &ScreeningOptions,
    ) -> (MatchResult, MatchExtras) {
        let result = self.matcher.compare(resume_text, job_text);

        let title = options
            .job_title
            .as_deref()
            .filter(|t| self.fields.enable_job_title && !t.trim().is_empty())
            .map(|t| match_title(&self.matcher, t, resume_text));

        let location = options
            .location
            .as_deref()
            .filter(|l| self.fields.enable_location && !l.trim().is_empty())
            .map(|l| self.location_matcher.match_location(l, resume_text));

        let extras = MatchExtras {
            title,
            location,
            gaps: keyword_gaps(&self.matcher, resume_text, job_text, self.fuzzy_threshold),
        };

        (result, extras)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_with_extras() {
        let screener = Screener::new(&Config::default());
        let options = ScreeningOptions {
            job_title: Some("Java Developer".to_string()),
            location: Some("Pune".to_string()),
        };

        let (result, extras) = screener.evaluate(
            "Java developer based in Pune with Spring Boot",
            "Java Developer with Spring, Kubernetes",
            &options,
        );

        assert!(result.shared_keywords.contains("spring"));
        assert_eq!(extras.title.as_ref().map(|t| t.score), Some(100));
        assert!(extras.location.as_ref().unwrap().found_in_resume);
        assert_eq!(extras.gaps.missing, vec!["kubernetes".to_string()]);
    }

    #[test]
    fn test_disabled_fields_are_not_evaluated() {
        let mut config = Config::default();
        config.fields.enable_job_title = false;
        config.fields.enable_location = false;
        let screener = Screener::new(&config);
        let options = ScreeningOptions {
            job_title: Some("Java Developer".to_string()),
            location: Some("Pune".to_string()),
        };

        let (_, extras) = screener.evaluate("Java developer in Pune", "Java Developer", &options);
        assert!(extras.title.is_none());
        assert!(extras.location.is_none());
    }

    #[tokio::test]
    async fn test_missing_input() {
        let mut screener = Screener::new(&Config::default());
        let options = ScreeningOptions::default();

        let result = screener.screen("Java developer", &[], &options).await;
        assert!(matches!(result, Err(ScreenerError::MissingInput(_))));

        let resumes = vec![PathBuf::from("cv.pdf")];
        let result = screener.screen("   \n", &resumes, &options).await;
        assert!(matches!(result, Err(ScreenerError::MissingInput(_))));
    }
}
