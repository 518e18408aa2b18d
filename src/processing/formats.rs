use std::fs;
use std::path::Path;

use docx_rs::read_docx;
use pdf_extract::extract_text as extract_pdf_text;
use thiserror::Error;
use tracing::debug;

/// Supported contract document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// PDF files (.pdf)
    Pdf,
    /// Word documents (.docx)
    Word,
}

/// Errors that can occur during format handling and text extraction
#[derive(Error, Debug)]
pub enum FormatError {
    /// Error when the file format is not supported
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Error when the file extension is missing
    #[error("Missing file extension")]
    MissingExtension,

    /// Error when reading the file
    #[error("File read error: {0}")]
    FileReadError(#[from] std::io::Error),

    /// Error during format-specific processing
    #[error("Processing error: {0}")]
    ProcessingError(String),

    /// Extraction produced no usable text
    #[error("Document contains no extractable text")]
    EmptyDocument,
}

/// Trait for format-specific document handlers
#[async_trait::async_trait]
pub trait FormatHandler: Send + Sync {
    /// Extract text content from a file, in reading order
    async fn extract_text(&self, file_path: &Path) -> Result<String, FormatError>;

    /// Get supported file extensions
    fn supported_extensions(&self) -> Vec<&'static str>;
}

/// Detect document format from the file extension
pub fn detect_format(file_path: &Path) -> Result<DocumentFormat, FormatError> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(FormatError::MissingExtension)?;

    match extension.to_lowercase().as_str() {
        "pdf" => Ok(DocumentFormat::Pdf),
        "docx" => Ok(DocumentFormat::Word),
        _ => Err(FormatError::UnsupportedFormat(extension.to_string())),
    }
}

/// Get the appropriate format handler for a document type
pub fn get_format_handler(format: DocumentFormat) -> Box<dyn FormatHandler> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfHandler),
        DocumentFormat::Word => Box::new(WordHandler),
    }
}

/// Extract the full text of a document, rejecting unsupported formats and
/// documents that yield no usable text.
pub async fn extract_document(file_path: &Path) -> Result<String, FormatError> {
    let format = detect_format(file_path)?;
    let handler = get_format_handler(format);
    let text = handler.extract_text(file_path).await?;

    if text.trim().is_empty() {
        return Err(FormatError::EmptyDocument);
    }

    debug!(
        chars = text.len(),
        "Extracted text from {}",
        file_path.display()
    );
    Ok(text)
}

/// Handler for PDF files
pub struct PdfHandler;

#[async_trait::async_trait]
impl FormatHandler for PdfHandler {
    async fn extract_text(&self, file_path: &Path) -> Result<String, FormatError> {
        extract_pdf_text(file_path)
            .map_err(|e| FormatError::ProcessingError(format!("PDF extraction error: {}", e)))
    }

    fn supported_extensions(&self) -> Vec<&'static str> {
        vec!["pdf"]
    }
}

/// Handler for Word documents
pub struct WordHandler;

#[async_trait::async_trait]
impl FormatHandler for WordHandler {
    async fn extract_text(&self, file_path: &Path) -> Result<String, FormatError> {
        let content = fs::read(file_path)?;

        let docx = read_docx(&content)
            .map_err(|e| FormatError::ProcessingError(format!("Word parsing error: {}", e)))?;

        let json: serde_json::Value = serde_json::from_str(&docx.json())
            .map_err(|e| FormatError::ProcessingError(format!("JSON parsing error: {}", e)))?;

        let mut text = String::new();
        if let Some(children) = json
            .get("document")
            .and_then(|d| d.get("children"))
            .and_then(|c| c.as_array())
        {
            for paragraph in children {
                let before = text.len();
                collect_text_runs(paragraph, &mut text);
                // One newline per paragraph keeps blank-line clause breaks intact
                if text.len() > before {
                    text.push('\n');
                }
            }
        }

        Ok(text)
    }

    fn supported_extensions(&self) -> Vec<&'static str> {
        vec!["docx"]
    }
}

/// Walks the docx JSON tree depth-first, appending every "text" leaf found
/// under a "data" node in document order.
fn collect_text_runs(node: &serde_json::Value, out: &mut String) {
    if let Some(data) = node.get("data") {
        if let Some(content) = data.get("text").and_then(|t| t.as_str()) {
            out.push_str(content);
        }
        if let Some(children) = data.get("children").and_then(|c| c.as_array()) {
            for child in children {
                collect_text_runs(child, out);
            }
        }
    }
}
