use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the raw text-extraction step only; record matching
/// over the extracted blob lives in `verdict-parsing`.
pub trait PdfBackend: Send + Sync {
    /// Extract the full text content of a PDF file: per-page text in page
    /// order, joined with a single newline.
    ///
    /// Fails if the file cannot be opened or is not a parseable PDF. There
    /// is no partial-result mode; extraction either yields the whole blob
    /// or an error.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
