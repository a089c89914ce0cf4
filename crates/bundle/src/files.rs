//! Structured file-list ingestion.
//!
//! The list-mode publish request carries files inline as JSON objects;
//! each resolves its bytes from Base64 or UTF-8 text. This path bypasses
//! the archive decoder entirely (no compression methods involved).

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bundle::BundleFile;
use crate::error::EncodingError;

/// One file in a list-mode publish request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSpec {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_base64: Option<String>,
}

impl FileSpec {
    /// A spec carrying inline UTF-8 text.
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: Some(content.into()),
            content_base64: None,
        }
    }

    /// A spec carrying Base64-encoded binary content.
    pub fn binary(path: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            path: path.into(),
            content: None,
            content_base64: Some(STANDARD.encode(bytes)),
        }
    }
}

/// Resolves each item's bytes and returns them in encounter order.
///
/// Resolution order per item: `contentBase64` first (invalid Base64 is
/// fatal to the whole publish), then inline `content` as UTF-8 bytes.
/// Items with neither source are skipped and contribute no entry.
pub fn read_file_specs(specs: Vec<FileSpec>) -> Result<Vec<BundleFile>, EncodingError> {
    let mut entries = Vec::with_capacity(specs.len());

    for spec in specs {
        let path = strip_leading_dot_slash(&spec.path);
        let bytes = if let Some(encoded) = &spec.content_base64 {
            STANDARD
                .decode(encoded)
                .map_err(|source| EncodingError::InvalidBase64 {
                    path: path.clone(),
                    source,
                })?
        } else if let Some(text) = spec.content {
            text.into_bytes()
        } else {
            debug!(path = %path, "skipping file with no content source");
            continue;
        };

        entries.push(BundleFile { path, bytes });
    }

    Ok(entries)
}

/// Strips a single leading `./` — one occurrence, start only.
fn strip_leading_dot_slash(path: &str) -> String {
    path.strip_prefix("./").unwrap_or(path).to_string()
}
