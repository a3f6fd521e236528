use std::path::Path;

pub mod matcher;
pub mod text_processing;

pub use matcher::{find_records, iter_records};
pub use text_processing::expand_ligatures;
// Re-export domain types from core (canonical definitions live there)
pub use verdict_core::{BackendError, PdfBackend, Record};

/// Extract test-result records from a PDF file using the given backend.
///
/// Pipeline:
/// 1. Extract text from the PDF via `backend` (pages joined by newlines)
/// 2. Expand typographic ligatures so tokens match their ASCII spellings
/// 3. Scan the text for test-result lines, in document order
pub fn extract_records(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
) -> Result<Vec<Record>, BackendError> {
    let text = backend.extract_text(pdf_path)?;
    let text = expand_ligatures(&text);
    Ok(find_records(&text))
}
