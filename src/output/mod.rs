//! Report model and output formatting

pub mod formatter;
pub mod report;

pub use formatter::{resolve_report_path, save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator};
pub use report::{JobSummary, ScreeningReport};
