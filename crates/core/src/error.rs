//! Error types for building and serializing the deck.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, writing or reading back a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to create, write or read a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A layout helper was given content it cannot place.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML generation or parsing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// A required part is missing from a package being read.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// A written file does not match the model it was written from.
    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}
