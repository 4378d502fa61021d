//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

impl From<zip::result::ZipError> for ScreenerError {
    fn from(err: zip::result::ZipError) -> Self {
        ScreenerError::DocxExtraction(err.to_string())
    }
}

impl From<roxmltree::Error> for ScreenerError {
    fn from(err: roxmltree::Error) -> Self {
        ScreenerError::DocxExtraction(format!("Could not parse XML tree: {}", err))
    }
}
