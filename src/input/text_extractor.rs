//! Text extraction from various file formats

use crate::error::{Result, ScreenerError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;
use zip::ZipArchive;

const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const DEFAULT_DOCX_PART: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // pdf-extract panics on some malformed documents; the blocking task contains it
        let parsed = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                ScreenerError::PdfExtraction(format!(
                    "PDF parser aborted on '{}': {}",
                    path.display(),
                    join_error_message(e)
                ))
            })?;

        parsed.map_err(|e| {
            ScreenerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

fn join_error_message(error: tokio::task::JoinError) -> String {
    if !error.is_panic() {
        return error.to_string();
    }
    let payload = error.into_panic();
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|msg| msg.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string())
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        extract_docx_text(&bytes).map_err(|e| match e {
            ScreenerError::DocxExtraction(msg) => ScreenerError::DocxExtraction(format!(
                "Failed to extract text from DOCX '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }
}

/// Paragraph text of a DOCX document, one paragraph per line
pub fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let part_name = main_document_part(&mut archive)?;
    let mut xml = String::new();
    archive
        .by_name(&part_name)
        .map_err(|_| ScreenerError::DocxExtraction(format!("Could not find '{}' in archive", part_name)))?
        .read_to_string(&mut xml)?;

    let doc = roxmltree::Document::parse(&xml)?;

    let paragraphs: Vec<String> = doc
        .descendants()
        .filter(|node| node.has_tag_name("p"))
        .map(|paragraph| {
            paragraph
                .descendants()
                // Text boxes nest whole paragraphs; those are emitted on their own
                .filter(|node| node.ancestors().find(|a| a.has_tag_name("p")) == Some(paragraph))
                .filter_map(|node| {
                    if node.has_tag_name("t") {
                        node.text()
                    } else if node.has_tag_name("tab") {
                        Some("\t")
                    } else {
                        None
                    }
                })
                .collect::<String>()
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Resolve the main document part through `_rels/.rels`
fn main_document_part<R: std::io::Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> Result<String> {
    let mut rels = String::new();
    match archive.by_name("_rels/.rels") {
        Ok(mut file) => {
            file.read_to_string(&mut rels)?;
        }
        Err(_) => return Ok(DEFAULT_DOCX_PART.to_string()),
    }

    let rel_xml = roxmltree::Document::parse(&rels)?;
    let target = rel_xml
        .descendants()
        .find(|elem| elem.attribute("Type") == Some(OFFICE_DOCUMENT_REL))
        .and_then(|elem| elem.attribute("Target"))
        .map(|target| target.trim_start_matches('/').to_string());

    Ok(target.unwrap_or_else(|| DEFAULT_DOCX_PART.to_string()))
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"))
}

pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let clean_text = tag_regex().replace_all(&text, "").replace("&amp;", "&");

    clean_text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
