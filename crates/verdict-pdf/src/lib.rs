use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use verdict_core::{BackendError, PdfBackend};

/// Leading bytes every PDF carries.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Default cap on input file size, in megabytes.
pub const DEFAULT_MAX_SIZE_MB: u32 = 100;

/// pdf-extract-based implementation of [`PdfBackend`].
///
/// Runs fully in-process with no native dependencies. The underlying parser
/// panics on some malformed documents, so extraction runs under
/// `catch_unwind` and panics surface as [`BackendError::Extraction`].
///
/// Inputs are preflighted: the size cap is checked against file metadata
/// before any bytes are read, and files without the `%PDF` header are
/// rejected before parsing.
pub struct PdfExtractBackend {
    /// Reject files larger than this many megabytes.
    max_size_mb: u32,
}

impl Default for PdfExtractBackend {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }
}

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input size cap in megabytes.
    pub fn with_max_size_mb(mut self, max_size_mb: u32) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }
}

impl PdfBackend for PdfExtractBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let max_bytes = u64::from(self.max_size_mb) * 1024 * 1024;
        if std::fs::metadata(path)?.len() > max_bytes {
            return Err(BackendError::Open(format!(
                "file exceeds the {} MB size limit",
                self.max_size_mb
            )));
        }

        let bytes = std::fs::read(path)?;

        if !bytes.starts_with(PDF_MAGIC) {
            return Err(BackendError::Open("missing %PDF header".into()));
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        }));

        let pages = match outcome {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => return Err(BackendError::Extraction(e.to_string())),
            Err(payload) => {
                return Err(BackendError::Extraction(format!(
                    "parser panicked: {}",
                    panic_message(payload.as_ref())
                )));
            }
        };

        tracing::info!(pages = pages.len(), path = %path.display(), "extracted PDF text");
        Ok(pages.join("\n"))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_io_error() {
        let backend = PdfExtractBackend::new();
        let err = backend
            .extract_text(Path::new("/nonexistent/report.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }

    #[test]
    fn non_pdf_file_is_rejected_before_parsing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "just some text, not a PDF").unwrap();

        let backend = PdfExtractBackend::new();
        let err = backend.extract_text(file.path()).unwrap_err();
        assert!(matches!(err, BackendError::Open(_)));
        assert!(err.to_string().contains("%PDF"));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "%PDF-1.5 pretend content").unwrap();

        let backend = PdfExtractBackend::new().with_max_size_mb(0);
        let err = backend.extract_text(file.path()).unwrap_err();
        assert!(matches!(err, BackendError::Open(_)));
        assert!(err.to_string().contains("size limit"));
    }

    #[cfg(unix)]
    #[test]
    fn size_cap_is_checked_before_the_file_is_read() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "%PDF-1.5 pretend content").unwrap();
        // Drop read permission: the cap check only consults metadata
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o200)).unwrap();

        let backend = PdfExtractBackend::new().with_max_size_mb(0);
        let err = backend.extract_text(file.path()).unwrap_err();
        assert!(matches!(err, BackendError::Open(_)));
        assert!(err.to_string().contains("size limit"));
    }

    #[test]
    fn malformed_pdf_body_is_an_extraction_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "%PDF-1.5\nnot actually a pdf body").unwrap();

        let backend = PdfExtractBackend::new();
        let err = backend.extract_text(file.path()).unwrap_err();
        assert!(matches!(err, BackendError::Extraction(_)));
    }
}
