//! Resume screener: fuzzy resume and job description matching tool

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::InputManager;
use resume_screener::output::{
    resolve_report_path, save_report_to_file, JobSummary, ReportGenerator, ScreeningReport,
};
use resume_screener::processing::{Screener, ScreeningOptions, TextMatcher};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        match e {
            ScreenerError::MissingInput(msg) => error!("{}", msg),
            other => error!("Command failed: {}", other),
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Screen {
            resumes,
            job_file,
            job_text,
            title,
            location,
            output,
            save,
            detailed,
            algorithm,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ScreenerError::InvalidInput)?,
                None => config.output.format.clone(),
            };
            if let Some(algorithm) = algorithm {
                config.matching.algorithm = cli::parse_algorithm(&algorithm).map_err(ScreenerError::InvalidInput)?;
            }
            let detailed = detailed || config.output.detailed;

            let report_base = job_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "job".to_string());
            let (job_text, job_source) = load_job_description(job_file, job_text).await?;

            let options = ScreeningOptions {
                job_title: title.clone(),
                location: location.clone(),
            };

            let start = Instant::now();
            let mut screener = Screener::new(&config);

            let progress = if resumes.len() > 1 && output_format == OutputFormat::Console {
                let bar = ProgressBar::new(resumes.len() as u64);
                bar.set_style(
                    ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=>-"),
                );
                Some(bar)
            } else {
                None
            };

            let documents = screener
                .screen_with_progress(&job_text, &resumes, &options, |doc| {
                    if let Some(bar) = &progress {
                        bar.set_message(doc.file_name.clone());
                        bar.inc(1);
                    }
                })
                .await?;

            if let Some(bar) = progress {
                bar.finish_and_clear();
            }

            let job = JobSummary {
                source: job_source,
                word_count: job_text.split_whitespace().count(),
                keyword_count: screener.matcher().extract_keywords(&job_text).len(),
                title: title.filter(|_| config.fields.enable_job_title),
                location: location.filter(|_| config.fields.enable_location),
            };

            let report = ScreeningReport::new(
                documents,
                job,
                config.matching.algorithm.to_string(),
                start.elapsed().as_millis() as u64,
            );
            info!(
                "Screened {} document(s): {} scored, {} skipped, {} failed",
                report.summary.total, report.summary.scored, report.summary.skipped, report.summary.failed
            );

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(
                use_colors,
                detailed,
                true,
                config.matching.max_missing_keywords,
            );
            let content = generator.generate_report(&report, &output_format)?;

            match save {
                Some(target) => {
                    let path = resolve_report_path(&target, &output_format, &report_base);
                    save_report_to_file(&content, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Keywords { input } => {
            let path = PathBuf::from(&input);
            let text = if path.exists() {
                InputManager::new().extract_text(&path).await?
            } else {
                input
            };

            let keywords = TextMatcher::new(config.matching.algorithm).extract_keywords(&text);
            println!("🔑 {} keyword(s)", keywords.len());
            for keyword in &keywords {
                println!("{}", keyword);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Algorithm: {}", config.matching.algorithm);
                println!("Near-miss threshold: {:.2}", config.matching.fuzzy_threshold);
                println!("Missing keywords shown: {}", config.matching.max_missing_keywords);
                println!("\nOptional fields:");
                println!("  Job title: {}", if config.fields.enable_job_title { "enabled" } else { "disabled" });
                println!("  Location: {}", if config.fields.enable_location { "enabled" } else { "disabled" });
                println!("  Known locations: {}", config.fields.known_locations.join(", "));
                println!("\nOutput: {:?} (detailed: {}, colors: {})",
                    config.output.format, config.output.detailed, config.output.color_output);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

/// Job description from a file or inline text; blank input is caught by the screener
async fn load_job_description(job_file: Option<PathBuf>, job_text: Option<String>) -> Result<(String, String)> {
    match (job_file, job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(&path, &["txt", "md", "markdown"])
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;
            let text = InputManager::new().read_job_description(&path).await?;
            Ok((text, path.display().to_string()))
        }
        (None, Some(text)) => Ok((text, "pasted text".to_string())),
        (None, None) => Ok((String::new(), "none".to_string())),
    }
}
