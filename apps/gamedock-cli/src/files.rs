//! Directory scanning for list-mode publishing.
//!
//! Recursively walks a game directory and produces publish specs with
//! relative paths normalized to forward slashes, sorted for deterministic
//! request ordering.

use std::path::Path;

use anyhow::Context;

use gamedock_bundle::FileSpec;

/// Collects every file under `root` as a publish spec.
///
/// With `prefer_text`, UTF-8 readable files are sent as inline text and
/// only the rest fall back to base64. Without it everything is base64.
pub fn scan_dir(root: &Path, prefer_text: bool) -> anyhow::Result<Vec<FileSpec>> {
    let mut paths = Vec::new();
    walk_dir(root, root, &mut paths)?;
    paths.sort();

    let mut specs = Vec::with_capacity(paths.len());
    for rel in paths {
        let bytes = std::fs::read(root.join(&rel))
            .with_context(|| format!("failed to read {rel}"))?;
        specs.push(to_spec(rel, bytes, prefer_text));
    }

    Ok(specs)
}

fn walk_dir(root: &Path, current: &Path, paths: &mut Vec<String>) -> anyhow::Result<()> {
    let entries = std::fs::read_dir(current)
        .with_context(|| format!("failed to read directory {}", current.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            walk_dir(root, &path, paths)?;
        } else if metadata.is_file() {
            let rel = path.strip_prefix(root).map_err(std::io::Error::other)?;
            paths.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }

    Ok(())
}

fn to_spec(path: String, bytes: Vec<u8>, prefer_text: bool) -> FileSpec {
    if prefer_text {
        match String::from_utf8(bytes) {
            Ok(text) => FileSpec::text(path, text),
            Err(err) => FileSpec::binary(path, err.as_bytes()),
        }
    } else {
        FileSpec::binary(path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("index.html"), b"<html></html>").unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(root.join("assets").join("sprite.png"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(root.join("game.js"), b"let x = 1;").unwrap();

        dir
    }

    #[test]
    fn scan_finds_all_files_sorted() {
        let dir = create_test_tree();
        let specs = scan_dir(dir.path(), false).unwrap();

        let paths: Vec<&str> = specs.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["assets/sprite.png", "game.js", "index.html"]);
    }

    #[test]
    fn default_mode_sends_everything_as_base64() {
        let dir = create_test_tree();
        let specs = scan_dir(dir.path(), false).unwrap();

        assert!(specs.iter().all(|s| s.content_base64.is_some()));
        assert!(specs.iter().all(|s| s.content.is_none()));
    }

    #[test]
    fn prefer_text_keeps_base64_for_binary_files() {
        let dir = create_test_tree();
        let specs = scan_dir(dir.path(), true).unwrap();

        let html = specs.iter().find(|s| s.path == "index.html").unwrap();
        assert_eq!(html.content.as_deref(), Some("<html></html>"));

        // 0xff 0xfe is not valid UTF-8, so the sprite stays base64.
        let sprite = specs.iter().find(|s| s.path == "assets/sprite.png").unwrap();
        assert!(sprite.content.is_none());
        assert!(sprite.content_base64.is_some());
    }

    #[test]
    fn scan_empty_dir() {
        let dir = TempDir::new().unwrap();
        let specs = scan_dir(dir.path(), false).unwrap();
        assert!(specs.is_empty());
    }

    #[test]
    fn scan_nonexistent_dir() {
        let result = scan_dir(Path::new("/nonexistent/path/that/does/not/exist"), false);
        assert!(result.is_err());
    }
}
