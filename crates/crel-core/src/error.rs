//! Error types for the crel-core library.

use thiserror::Error;

/// Main error type for the crel library.
#[derive(Error, Debug)]
pub enum CrelError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Supplier directory error.
    #[error("supplier directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while loading the supplier reference dataset.
///
/// Every extraction consults the directory, so these are fatal at startup.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The dataset could not be read.
    #[error("failed to read supplier dataset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A required column is missing from the header row.
    #[error("supplier dataset is missing column '{0}'")]
    MissingColumn(&'static str),

    /// A data row could not be decoded.
    #[error("malformed supplier row {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

/// Errors related to record extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input format is not supported.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for the crel library.
pub type Result<T> = std::result::Result<T, CrelError>;
