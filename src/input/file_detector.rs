//! File type detection

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &std::path::Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Resumes are accepted as PDF or DOCX uploads only
    pub fn is_resume_format(&self) -> bool {
        matches!(self, FileType::Pdf | FileType::Docx)
    }

    /// Job descriptions may also be plain text or markdown
    pub fn is_job_format(&self) -> bool {
        matches!(self, FileType::Text | FileType::Markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_detection() {
        assert_eq!(FileType::from_path(Path::new("cv.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("jd.markdown")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("cv.doc")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("README")), FileType::Unknown);
    }

    #[test]
    fn test_resume_formats() {
        assert!(FileType::Pdf.is_resume_format());
        assert!(FileType::Docx.is_resume_format());
        assert!(!FileType::Text.is_resume_format());
        assert!(FileType::Text.is_job_format());
    }
}
