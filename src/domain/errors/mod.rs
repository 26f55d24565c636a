// Domain errors - Failure taxonomy for listing, downloading and processing

use std::fmt;

/// Domain-specific error types
///
/// Every variant is recovered at the smallest enclosing unit (line, clip,
/// file) except `DependencyMissing`, which the command-line entry point
/// treats as fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A required external tool is absent or does not start
    DependencyMissing(String),
    /// The listing tool exited non-zero; carries its stderr text
    ListingFailed(String),
    /// A listing line could not be decoded as a clip record
    RecordMalformed(String),
    /// A clip record reached the downloader without a URL
    NoUrl(String),
    /// The download tool failed or produced no file
    DownloadFailed(String),
    /// Metadata sidecar could not be written
    MetadataWriteFailed(String),
    /// Upload instructions could not be written
    InstructionsWriteFailed(String),
    /// A processing operation failed
    OperationFailed(String),
    /// Resize target is not one of the known platforms
    UnknownPlatform { requested: String, valid: Vec<String> },
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Filesystem failure
    FsFail(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::DependencyMissing(msg) => write!(f, "Missing dependency: {}", msg),
            DomainError::ListingFailed(msg) => write!(f, "Clip listing failed: {}", msg),
            DomainError::RecordMalformed(msg) => write!(f, "Malformed clip record: {}", msg),
            DomainError::NoUrl(title) => write!(f, "No URL for clip {}", title),
            DomainError::DownloadFailed(msg) => write!(f, "Download failed: {}", msg),
            DomainError::MetadataWriteFailed(msg) => {
                write!(f, "Failed to write metadata file: {}", msg)
            }
            DomainError::InstructionsWriteFailed(msg) => {
                write!(f, "Failed to write upload instructions: {}", msg)
            }
            DomainError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            DomainError::UnknownPlatform { requested, valid } => write!(
                f,
                "Unknown platform: {}. Supported platforms: {}",
                requested,
                valid.join(", ")
            ),
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::FsFail(msg) => write!(f, "Filesystem error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::FsFail(err.to_string())
    }
}
