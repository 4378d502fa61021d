//! CLI interface for the resume screener

use crate::config::OutputFormat;
use crate::processing::similarity::SimilarityAlgorithm;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Resume screening tool")]
#[command(long_about = "Upload one or more resumes (PDF/DOCX), provide a job description, and get a fuzzy match score plus overlapping keywords for each resume")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one or more resumes against a job description
    #[command(group(ArgGroup::new("job").args(["job_file", "job_text"])))]
    Screen {
        /// Resume file (PDF or DOCX); repeat for a batch
        #[arg(short, long = "resume", value_name = "FILE")]
        resumes: Vec<PathBuf>,

        /// Job description file (TXT, MD)
        #[arg(short = 'j', long)]
        job_file: Option<PathBuf>,

        /// Job description text
        #[arg(short = 't', long)]
        job_text: Option<String>,

        /// Job title to look for in each resume
        #[arg(long)]
        title: Option<String>,

        /// Preferred job location
        #[arg(long)]
        location: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Similarity algorithm: indel, levenshtein, jaro-winkler
        #[arg(short, long)]
        algorithm: Option<String>,
    },

    /// Print the keywords extracted from a file or text
    Keywords {
        /// File path (PDF, DOCX, TXT, MD) or literal text
        input: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

pub fn parse_algorithm(algorithm: &str) -> Result<SimilarityAlgorithm, String> {
    match algorithm.to_lowercase().as_str() {
        "indel" | "ratio" => Ok(SimilarityAlgorithm::Indel),
        "levenshtein" => Ok(SimilarityAlgorithm::NormalizedLevenshtein),
        "jaro-winkler" | "jaro_winkler" | "jarowinkler" => Ok(SimilarityAlgorithm::JaroWinkler),
        _ => Err(format!(
            "Invalid algorithm: {}. Supported: indel, levenshtein, jaro-winkler",
            algorithm
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screen_batch() {
        let cli = Cli::try_parse_from([
            "resume-screener", "screen", "-r", "a.pdf", "-r", "b.docx", "--job-text", "Java developer",
            "--title", "Backend Engineer",
        ])
        .unwrap();

        match cli.command {
            Commands::Screen { resumes, job_text, title, job_file, .. } => {
                assert_eq!(resumes, vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")]);
                assert_eq!(job_text.as_deref(), Some("Java developer"));
                assert_eq!(title.as_deref(), Some("Backend Engineer"));
                assert!(job_file.is_none());
            }
            _ => panic!("expected screen command"),
        }
    }

    #[test]
    fn test_job_file_and_text_conflict() {
        let result = Cli::try_parse_from([
            "resume-screener", "screen", "-r", "a.pdf", "-j", "jd.txt", "-t", "Java developer",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
        assert_eq!(parse_algorithm("Jaro-Winkler"), Ok(SimilarityAlgorithm::JaroWinkler));
        assert!(parse_algorithm("cosine").is_err());
        assert!(validate_file_extension(Path::new("jd.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("jd"), &["txt", "md"]).is_err());
    }
}
