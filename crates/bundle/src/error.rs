//! Bundle ingestion error types.

/// Errors produced while decoding a zip archive.
///
/// Every variant is a caller mistake: surfaced immediately, never retried.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("only .zip archives are supported: {0}")]
    BadExtension(String),

    #[error("invalid or corrupted zip archive: {0}")]
    Parse(String),

    #[error("zip archive contains no files")]
    Empty,
}

/// Errors produced while resolving file-list content.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid base64 content in {path}")]
    InvalidBase64 {
        path: String,
        #[source]
        source: base64::DecodeError,
    },
}
