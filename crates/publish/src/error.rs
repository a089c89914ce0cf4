use gamedock_bundle::{ArchiveError, EncodingError};

use crate::storage::StoreError;
use crate::validate::ValidationError;

/// Errors that can end a publish attempt.
///
/// The first three variants are caller mistakes; `Storage` is an internal
/// fault and is reported to callers without detail.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
