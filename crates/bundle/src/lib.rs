//! Game bundle ingestion and normalization.
//!
//! This crate turns a user-supplied bundle — a zip archive or an explicit
//! file list — into one canonical, ordered set of files ready for
//! validation, storage, and serving. It is a library crate with no I/O
//! beyond reading the bytes it is given.
//!
//! # Pipeline
//!
//! 1. **Decode** — parse the zip central directory and inflate entries
//!    ([`decode_archive`]), or resolve list items from inline text / Base64
//!    ([`read_file_specs`])
//! 2. **Normalize** — forward slashes, clean relative segments, macOS
//!    metadata dropped, shared top-level folder stripped
//!    ([`normalize_entries`])
//! 3. **Assemble** — ordered entries plus aggregate counts and the
//!    `index.html` entry point ([`assemble`])

pub mod archive;
pub mod bundle;
pub mod error;
pub mod files;
pub mod paths;

// Re-export primary types for convenience.
pub use archive::{CompressionMethod, decode_archive};
pub use bundle::{BundleFile, ENTRY_POINT, NormalizedBundle, assemble};
pub use error::{ArchiveError, EncodingError};
pub use files::{FileSpec, read_file_specs};
pub use paths::normalize_entries;
