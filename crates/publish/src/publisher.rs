use std::path::Path;

use tracing::{debug, info, warn};

use gamedock_bundle::{
    ArchiveError, BundleFile, FileSpec, assemble, decode_archive, normalize_entries,
    read_file_specs,
};

use crate::error::PublishError;
use crate::record::{GameRecord, PublishRequest, allocate_id, oss_prefix};
use crate::storage::ObjectStore;
use crate::url::HostPolicy;
use crate::validate::{ValidationError, validate_bundle};

/// Runs the publish pipeline against a single object store.
pub struct Publisher<'a> {
    store: &'a dyn ObjectStore,
    policy: HostPolicy,
}

impl<'a> Publisher<'a> {
    pub fn new(store: &'a dyn ObjectStore, policy: HostPolicy) -> Self {
        Self { store, policy }
    }

    /// Publishes a game from an uploaded zip archive.
    ///
    /// The pipeline:
    /// 1. Check title and `.zip` filename extension
    /// 2. Decode the archive into file entries
    /// 3. Normalize, assemble, validate
    /// 4. Store bytes, then build the game record
    pub async fn publish_archive(
        &self,
        filename: &str,
        data: &[u8],
        request: &PublishRequest,
    ) -> Result<GameRecord, PublishError> {
        if request.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle.into());
        }
        if !has_zip_extension(filename) {
            return Err(ArchiveError::BadExtension(filename.to_string()).into());
        }

        let entries = decode_archive(data)?;
        debug!(archive = %filename, entries = entries.len(), "archive decoded");

        self.publish_entries(request, entries).await
    }

    /// Publishes a game from an explicit file list.
    ///
    /// Entries that carry neither inline text nor base64 content are
    /// skipped; invalid base64 fails the whole request.
    pub async fn publish_files(
        &self,
        request: &PublishRequest,
        files: Vec<FileSpec>,
    ) -> Result<GameRecord, PublishError> {
        if request.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle.into());
        }
        if files.is_empty() {
            return Err(ValidationError::MissingFiles.into());
        }

        let entries = read_file_specs(files)?;
        self.publish_entries(request, entries).await
    }

    /// Shared tail of both publish modes.
    async fn publish_entries(
        &self,
        request: &PublishRequest,
        entries: Vec<BundleFile>,
    ) -> Result<GameRecord, PublishError> {
        let bundle = assemble(normalize_entries(entries));
        validate_bundle(&request.title, &bundle)?;

        let id = allocate_id();
        let prefix = oss_prefix(&id);

        if let Err(err) = self.store.put(&prefix, &bundle.entries).await {
            warn!(game_id = %id, error = %err, "bundle storage failed");
            return Err(err.into());
        }

        let record = GameRecord::build(id, prefix, request, &bundle, &self.policy);
        info!(
            game_id = %record.id,
            files = record.file_count,
            total_bytes = record.total_size,
            url = %record.game_url,
            "game published"
        );

        Ok(record)
    }
}

/// ASCII case-insensitive `.zip` check on the uploaded filename.
fn has_zip_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}
