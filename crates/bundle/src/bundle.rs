//! Bundle types and assembly.

/// Path every publishable bundle must contain after normalization.
pub const ENTRY_POINT: &str = "index.html";

/// One bundle file: a relative path plus its resolved bytes.
///
/// After [`crate::normalize_entries`] the path is forward-slash separated,
/// non-empty, carries no leading `./` or `/`, never refers to a directory,
/// and is never a macOS metadata path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub path: String,
    pub bytes: Vec<u8>,
}

/// An ordered bundle produced from either ingestion mode.
#[derive(Debug, Clone)]
pub struct NormalizedBundle {
    /// Entries in encounter order.
    pub entries: Vec<BundleFile>,
    /// Path of the first entry equal to [`ENTRY_POINT`], if any.
    pub entry_point: Option<String>,
    pub file_count: i32,
    pub total_size: i64,
}

/// Aggregates normalized entries into a bundle.
///
/// Pure aggregation: preserves order, computes counts, and locates the
/// entry point. Eligibility itself is the validator's job.
pub fn assemble(entries: Vec<BundleFile>) -> NormalizedBundle {
    let entry_point = entries
        .iter()
        .find(|e| e.path == ENTRY_POINT)
        .map(|e| e.path.clone());
    let file_count = entries.len() as i32;
    let total_size = entries.iter().map(|e| e.bytes.len() as i64).sum();

    NormalizedBundle {
        entries,
        entry_point,
        file_count,
        total_size,
    }
}
