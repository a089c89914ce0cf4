//! Entry path normalization.
//!
//! Both ingestion modes funnel their raw paths through this module so the
//! bundle ends up with one canonical shape: forward slashes, clean relative
//! segments, macOS metadata dropped, and a shared top-level folder stripped.

use tracing::debug;

use crate::bundle::BundleFile;

/// Returns true for macOS metadata paths that never belong in a bundle.
pub(crate) fn is_metadata_path(path: &str) -> bool {
    path == ".DS_Store" || path.starts_with("__MACOSX/")
}

/// Normalizes every entry path and applies the global folder-strip decision.
///
/// Entries whose paths reduce to nothing servable (directory markers, empty
/// segments, metadata) are dropped. When every surviving path descends
/// through the same top-level folder, that folder is stripped from all of
/// them; the decision is all-or-nothing, and a single top-level file
/// disqualifies it. Stripping repeats until no shared folder remains, which
/// makes the whole function idempotent.
pub fn normalize_entries(entries: Vec<BundleFile>) -> Vec<BundleFile> {
    let mut kept: Vec<BundleFile> = entries
        .into_iter()
        .filter_map(|entry| {
            clean_path(&entry.path).map(|path| BundleFile {
                path,
                bytes: entry.bytes,
            })
        })
        .collect();

    while let Some(folder) = shared_root(&kept) {
        debug!(folder = %folder, "stripping shared top-level folder");
        kept = kept
            .into_iter()
            .filter_map(|entry| {
                let rest = entry.path.split_once('/').map(|(_, rest)| rest)?;
                if rest.is_empty() || is_metadata_path(rest) {
                    debug!(path = %entry.path, "dropping entry uncovered by folder stripping");
                    return None;
                }
                Some(BundleFile {
                    path: rest.to_string(),
                    bytes: entry.bytes,
                })
            })
            .collect();
    }

    kept
}

/// Cleans one raw path into a relative key path.
///
/// Backslashes become forward slashes; `.` and empty segments drop out;
/// `..` pops the previous segment and is clamped at the root. Returns
/// `None` when nothing servable remains.
fn clean_path(raw: &str) -> Option<String> {
    let slashed = raw.replace('\\', "/");
    if slashed.is_empty() || slashed.ends_with('/') {
        return None; // directory marker
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in slashed.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        return None;
    }

    let cleaned = segments.join("/");
    if is_metadata_path(&cleaned) {
        return None;
    }
    Some(cleaned)
}

/// The single top-level folder shared by every path, if any.
///
/// Every entry must descend through the same first segment; a path without
/// a separator (a file at the top level) disqualifies stripping for the
/// whole set.
fn shared_root(entries: &[BundleFile]) -> Option<String> {
    let (first_root, _) = entries.first()?.path.split_once('/')?;

    for entry in entries {
        match entry.path.split_once('/') {
            Some((root, _)) if root == first_root => {}
            _ => return None,
        }
    }
    Some(first_root.to_string())
}
