use gamedock_bundle::NormalizedBundle;

/// Rejections for games that are not eligible to publish.
///
/// Messages are caller-facing and returned verbatim in failure responses.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,

    #[error("files is required")]
    MissingFiles,

    #[error("index.html is required as entry point")]
    MissingEntryPoint,

    #[error("bundle contains no files")]
    EmptyBundle,
}

/// Checks publish eligibility for an assembled bundle.
///
/// Checks run in a fixed order and the first failure wins: title, then
/// bundle emptiness, then entry point. Side-effect free, so callers may
/// front-load cheaper checks without changing the outcome here.
pub fn validate_bundle(title: &str, bundle: &NormalizedBundle) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    if bundle.entries.is_empty() {
        return Err(ValidationError::EmptyBundle);
    }

    if bundle.entry_point.is_none() {
        return Err(ValidationError::MissingEntryPoint);
    }

    Ok(())
}
