//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::{verdict, ScreeningReport};
use crate::processing::extras::MatchExtras;
use crate::processing::screening::{DocumentOutcome, DocumentReport};
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

const NO_OVERLAP: &str = "No significant keyword overlap found.";

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    max_missing_keywords: usize,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resume Screening Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; color: #333; background: #f8f9fa; }
        .card { background: white; padding: 20px; margin: 15px 0; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .score { font-size: 1.6em; font-weight: bold; }
        .score-excellent { color: #28a745; }
        .score-good { color: #17a2b8; }
        .score-fair { color: #c69500; }
        .score-poor { color: #dc3545; }
        .warning { color: #c69500; }
        .error { color: #dc3545; }
        .keywords { font-family: monospace; }
        .metadata { font-size: 0.85em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Resume Screening Report</h1>
    <div class="card">
        <p><strong>Job description:</strong> {{ job_source }} ({{ job_word_count }} words)</p>
        {% if has_title %}<p><strong>Job title:</strong> {{ job_title }}</p>{% endif %}
        {% if has_location %}<p><strong>Location:</strong> {{ job_location }}</p>{% endif %}
        <p>{{ summary_line }}</p>
    </div>
    {% for doc in documents %}
    <div class="card">
        <h2>{{ doc.file_name }}</h2>
        {% if doc.scored %}
        <p class="score {{ doc.score_class }}">Match Score: {{ doc.score }}% ({{ doc.verdict }})</p>
        <h3>Matching Keywords</h3>
        <p class="keywords">{{ doc.keywords }}</p>
        {% for line in doc.extra_lines %}<p>{{ line }}</p>{% endfor %}
        {% else %}
        <p class="{{ doc.status_class }}">{{ doc.message }}</p>
        {% endif %}
    </div>
    {% endfor %}
    <div class="metadata">
        <p>Generated by Resume Screener v{{ version }} at {{ generated_at }} using the {{ algorithm }} ratio</p>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    job_source: String,
    job_word_count: usize,
    job_title: String,
    has_title: bool,
    job_location: String,
    has_location: bool,
    summary_line: String,
    documents: Vec<HtmlDocument>,
    version: String,
    generated_at: String,
    algorithm: String,
}

struct HtmlDocument {
    file_name: String,
    scored: bool,
    score: u8,
    score_class: &'static str,
    verdict: &'static str,
    keywords: String,
    extra_lines: Vec<String>,
    status_class: &'static str,
    message: String,
}

fn keyword_list(doc_keywords: &std::collections::BTreeSet<String>) -> String {
    if doc_keywords.is_empty() {
        NO_OVERLAP.to_string()
    } else {
        doc_keywords.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Plain-text lines describing the optional match details
fn extra_lines(extras: &MatchExtras, max_missing: usize) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(title) = &extras.title {
        lines.push(format!("Job title match ({}): {}%", title.title, title.score));
    }
    if let Some(location) = &extras.location {
        let found = if location.found_in_resume { "found" } else { "not found" };
        lines.push(format!("Location '{}': {} in resume", location.requested, found));
        if !location.resume_locations.is_empty() {
            lines.push(format!("Locations mentioned: {}", location.resume_locations.join(", ")));
        }
    }
    if !extras.gaps.near_misses.is_empty() {
        let near: Vec<String> = extras
            .gaps
            .near_misses
            .iter()
            .map(|n| format!("{} ~ {}", n.job_keyword, n.resume_keyword))
            .collect();
        lines.push(format!("Close matches: {}", near.join(", ")));
    }
    if !extras.gaps.missing.is_empty() && max_missing > 0 {
        let shown: Vec<&str> = extras.gaps.missing.iter().take(max_missing).map(String::as_str).collect();
        let more = extras.gaps.missing.len().saturating_sub(shown.len());
        let suffix = if more > 0 { format!(" (+{} more)", more) } else { String::new() };
        lines.push(format!("Missing keywords: {}{}", shown.join(", "), suffix));
    }

    lines
}

fn summary_line(report: &ScreeningReport) -> String {
    let mut line = format!(
        "{} document(s): {} scored, {} skipped, {} failed",
        report.summary.total, report.summary.scored, report.summary.skipped, report.summary.failed
    );
    if let (Some(name), Some(score)) = (&report.summary.best_match, report.summary.best_score) {
        line.push_str(&format!(". Best match: {} ({}%)", name, score));
    }
    line
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            max_missing_keywords: 15,
        }
    }

    pub fn with_max_missing_keywords(mut self, max: usize) -> Self {
        self.max_missing_keywords = max;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn score_color(score: u8) -> Color {
        match score {
            75..=100 => Color::Green,
            60..=74 => Color::Yellow,
            40..=59 => Color::BrightYellow,
            _ => Color::Red,
        }
    }

    fn format_document(&self, doc: &DocumentReport) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n📄 {}\n", self.colorize(&doc.file_name, Color::Cyan)));

        match &doc.outcome {
            DocumentOutcome::Scored {
                result,
                extras,
                word_count,
            } => {
                let score = format!("{}%", result.score);
                output.push_str(&format!(
                    "  ✅ Match Score: {} ({})\n",
                    self.colorize(&score, Self::score_color(result.score)),
                    verdict(result.score)
                ));

                if result.shared_keywords.is_empty() {
                    output.push_str(&format!("  ⚠️  {}\n", self.colorize(NO_OVERLAP, Color::Yellow)));
                } else {
                    output.push_str(&format!("  🔑 Matching Keywords: {}\n", keyword_list(&result.shared_keywords)));
                }

                let max_missing = if self.detailed { self.max_missing_keywords } else { 0 };
                for line in extra_lines(extras, max_missing) {
                    output.push_str(&format!("  • {}\n", line));
                }

                if self.detailed {
                    output.push_str(&format!(
                        "  • Resume length: {} words, {} shared keyword(s)\n",
                        word_count,
                        result.shared_keywords.len()
                    ));
                }
            }
            DocumentOutcome::Skipped { reason } => {
                output.push_str(&format!("  ⚠️  Skipped: {}\n", self.colorize(reason, Color::Yellow)));
            }
            DocumentOutcome::Failed { error } => {
                output.push_str(&format!("  ❌ Error: {}\n", self.colorize(error, Color::Red)));
            }
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🧠 RESUME SCREENING RESULTS"));
        output.push_str(&format!(
            "Job description: {} ({} words, {} keywords)\n",
            report.job.source, report.job.word_count, report.job.keyword_count
        ));
        if let Some(title) = &report.job.title {
            output.push_str(&format!("Job title: {}\n", title));
        }
        if let Some(location) = &report.job.location {
            output.push_str(&format!("Location: {}\n", location));
        }

        for doc in &report.documents {
            output.push_str(&self.format_document(doc));
        }

        output.push_str(&self.format_header("Summary"));
        output.push_str(&format!("{}\n", summary_line(report)));

        if self.detailed && report.summary.scored > 1 {
            output.push_str("\nRanking:\n");
            for (i, doc) in report.ranked().iter().enumerate() {
                output.push_str(&format!("  {}. {} ({}%)\n", i + 1, doc.file_name, doc.score().unwrap_or(0)));
            }
        }

        if self.detailed {
            output.push_str(&format!(
                "\nProcessing time: {}ms | Algorithm: {}\n",
                report.metadata.processing_time_ms, report.metadata.algorithm
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 🧠 Resume Screening Report\n\n");
        output.push_str(&format!(
            "**Job description:** `{}` ({} words)\n\n",
            report.job.source, report.job.word_count
        ));
        if let Some(title) = &report.job.title {
            output.push_str(&format!("**Job title:** {}\n\n", title));
        }
        if let Some(location) = &report.job.location {
            output.push_str(&format!("**Location:** {}\n\n", location));
        }

        output.push_str("| Document | Score | Verdict |\n");
        output.push_str("|----------|-------|---------|\n");
        for doc in &report.documents {
            let (score, status) = match &doc.outcome {
                DocumentOutcome::Scored { result, .. } => (format!("{}%", result.score), verdict(result.score)),
                DocumentOutcome::Skipped { .. } => ("-".to_string(), "Skipped"),
                DocumentOutcome::Failed { .. } => ("-".to_string(), "Error"),
            };
            output.push_str(&format!("| {} | {} | {} |\n", doc.file_name, score, status));
        }
        output.push('\n');

        for doc in &report.documents {
            output.push_str(&format!("## {}\n\n", doc.file_name));
            match &doc.outcome {
                DocumentOutcome::Scored { result, extras, .. } => {
                    output.push_str(&format!("**Match Score:** {}%\n\n", result.score));
                    output.push_str(&format!("**Matching Keywords:** {}\n\n", keyword_list(&result.shared_keywords)));
                    for line in extra_lines(extras, usize::MAX) {
                        output.push_str(&format!("- {}\n", line));
                    }
                    output.push('\n');
                }
                DocumentOutcome::Skipped { reason } => {
                    output.push_str(&format!("> ⚠️ Skipped: {}\n\n", reason));
                }
                DocumentOutcome::Failed { error } => {
                    output.push_str(&format!("> ❌ Error: {}\n\n", error));
                }
            }
        }

        output.push_str(&format!("**Summary:** {}\n\n", summary_line(report)));

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Screener v{} on {} ({} ratio, {}ms)*\n",
                report.metadata.screener_version,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.algorithm,
                report.metadata.processing_time_ms
            ));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ScreeningReport) -> HtmlTemplate {
        let documents = report
            .documents
            .iter()
            .map(|doc| match &doc.outcome {
                DocumentOutcome::Scored { result, extras, .. } => HtmlDocument {
                    file_name: doc.file_name.clone(),
                    scored: true,
                    score: result.score,
                    score_class: match result.score {
                        90..=100 => "score-excellent",
                        75..=89 => "score-good",
                        50..=74 => "score-fair",
                        _ => "score-poor",
                    },
                    verdict: verdict(result.score),
                    keywords: keyword_list(&result.shared_keywords),
                    extra_lines: extra_lines(extras, usize::MAX),
                    status_class: "",
                    message: String::new(),
                },
                DocumentOutcome::Skipped { reason } => HtmlDocument {
                    file_name: doc.file_name.clone(),
                    scored: false,
                    score: 0,
                    score_class: "",
                    verdict: "",
                    keywords: String::new(),
                    extra_lines: Vec::new(),
                    status_class: "warning",
                    message: format!("Skipped: {}", reason),
                },
                DocumentOutcome::Failed { error } => HtmlDocument {
                    file_name: doc.file_name.clone(),
                    scored: false,
                    score: 0,
                    score_class: "",
                    verdict: "",
                    keywords: String::new(),
                    extra_lines: Vec::new(),
                    status_class: "error",
                    message: format!("Error: {}", error),
                },
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            job_source: report.job.source.clone(),
            job_word_count: report.job.word_count,
            job_title: report.job.title.clone().unwrap_or_default(),
            has_title: report.job.title.is_some(),
            job_location: report.job.location.clone().unwrap_or_default(),
            has_location: report.job.location.is_some(),
            summary_line: summary_line(report),
            documents,
            version: report.metadata.screener_version.clone(),
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            algorithm: report.metadata.algorithm.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ScreenerError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, 15)
    }

    pub fn with_options(use_colors: bool, detailed: bool, include_metadata: bool, max_missing_keywords: usize) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed)
                .with_max_missing_keywords(max_missing_keywords),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// A directory target gets a generated, timestamped file name inside it
pub fn resolve_report_path(target: &Path, format: &OutputFormat, base_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, base_name, true))
    } else {
        target.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, base_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(base_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_screening{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_screening{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_screening{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}_screening{}.html", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::JobSummary;
    use crate::processing::extras::{KeywordGaps, LocationMatch, TitleMatch};
    use crate::processing::text_matcher::MatchResult;

    fn sample_report() -> ScreeningReport {
        let documents = vec![
            DocumentReport {
                file_name: "jane.pdf".to_string(),
                path: "resumes/jane.pdf".to_string(),
                outcome: DocumentOutcome::Scored {
                    result: MatchResult {
                        score: 68,
                        shared_keywords: ["java", "spring"].iter().map(|s| s.to_string()).collect(),
                    },
                    extras: MatchExtras {
                        title: Some(TitleMatch {
                            title: "Java Developer".to_string(),
                            score: 100,
                        }),
                        location: Some(LocationMatch {
                            requested: "Pune".to_string(),
                            found_in_resume: true,
                            resume_locations: vec!["Pune".to_string()],
                        }),
                        gaps: KeywordGaps {
                            missing: vec!["kubernetes".to_string()],
                            near_misses: Vec::new(),
                        },
                    },
                    word_count: 120,
                },
            },
            DocumentReport {
                file_name: "empty.docx".to_string(),
                path: "resumes/empty.docx".to_string(),
                outcome: DocumentOutcome::Scored {
                    result: MatchResult {
                        score: 12,
                        shared_keywords: Default::default(),
                    },
                    extras: MatchExtras::default(),
                    word_count: 3,
                },
            },
            DocumentReport {
                file_name: "notes.txt".to_string(),
                path: "resumes/notes.txt".to_string(),
                outcome: DocumentOutcome::Skipped {
                    reason: "resumes/notes.txt is not a PDF or DOCX file".to_string(),
                },
            },
        ];

        let job = JobSummary {
            source: "jd.txt".to_string(),
            word_count: 40,
            keyword_count: 12,
            title: Some("Java Developer".to_string()),
            location: Some("Pune".to_string()),
        };

        ScreeningReport::new(documents, job, "indel".to_string(), 5)
    }

    #[test]
    fn test_console_output() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("Match Score: 68%"));
        assert!(output.contains("Matching Keywords: java, spring"));
        assert!(output.contains(NO_OVERLAP));
        assert!(output.contains("Skipped:"));
        assert!(output.contains("Job title match (Java Developer): 100%"));
        assert!(output.contains("Missing keywords: kubernetes"));
        assert!(output.contains("1. jane.pdf (68%)"));
    }

    #[test]
    fn test_json_output() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["summary"]["scored"], 2);
        assert_eq!(value["documents"][0]["outcome"]["status"], "scored");
        assert_eq!(value["documents"][0]["outcome"]["result"]["score"], 68);
        assert_eq!(value["documents"][2]["outcome"]["status"], "skipped");
    }

    #[test]
    fn test_markdown_output() {
        let formatter = MarkdownFormatter::new(true);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("| jane.pdf | 68% | Moderate match |"));
        assert!(output.contains("| notes.txt | - | Skipped |"));
        assert!(output.contains("Generated by Resume Screener"));
    }

    #[test]
    fn test_html_output_escapes_and_renders() {
        let mut report = sample_report();
        report.documents[0].file_name = "<script>.pdf".to_string();

        let output = HtmlFormatter::new(false).format_report(&report).unwrap();

        assert!(output.contains("Match Score: 68%"));
        assert!(output.contains("java, spring"));
        assert!(!output.contains("<script>.pdf"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Json, "jobs/backend.txt", false), "backend_screening.json");
        assert_eq!(suggest_filename(&OutputFormat::Html, "report", false), "report_screening.html");
    }

    #[test]
    fn test_resolve_report_path() {
        let dir = tempfile::tempdir().unwrap();

        let path = resolve_report_path(dir.path(), &OutputFormat::Markdown, "jobs/backend.txt");
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("backend_screening_"));
        assert!(name.ends_with(".md"));

        let file = dir.path().join("out.json");
        assert_eq!(resolve_report_path(&file, &OutputFormat::Json, "backend"), file);
    }
}
