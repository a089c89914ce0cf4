use std::future::Future;
use std::pin::Pin;

use gamedock_bundle::BundleFile;

/// Errors surfaced by object-store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Destination for a published bundle's bytes.
///
/// Apps implement this on top of their actual backend (local filesystem,
/// OSS bucket). Using a trait keeps the publish flow decoupled from
/// storage and testable with mocks.
pub trait ObjectStore: Send + Sync {
    /// Writes every bundle entry under the given key prefix.
    ///
    /// The publisher only builds a game record after this succeeds, so a
    /// failing store must not leave a published game behind.
    fn put(
        &self,
        prefix: &str,
        entries: &[BundleFile],
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>>;
}
