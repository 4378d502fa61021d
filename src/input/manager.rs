//! Input manager for handling different file types

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Extract text from any supported file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            debug!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    /// Extract text from a resume, accepting only PDF and DOCX files
    pub async fn extract_resume_text(&mut self, path: &Path) -> Result<String> {
        if !FileType::from_path(path).is_resume_format() {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "{} is not a PDF or DOCX file",
                path.display()
            )));
        }
        self.extract_text(path).await
    }

    /// Read a job description from a text or markdown file
    pub async fn read_job_description(&mut self, path: &Path) -> Result<String> {
        if !FileType::from_path(path).is_job_format() {
            return Err(ScreenerError::InvalidInput(format!(
                "Job description must be a .txt or .md file: {}",
                path.display()
            )));
        }
        self.extract_text(path).await
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ScreenerError::UnsupportedFormat(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
