use serde::{Deserialize, Serialize};

use crate::error::PublishError;
use crate::record::GameRecord;

/// Wire envelope returned by both publish modes.
///
/// Success carries the game record in `data`; failure carries a
/// caller-facing message in `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GameRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(record: GameRecord) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
        }
    }

    pub fn failed(err: &PublishError) -> Self {
        let (_, message) = error_parts(err);
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Status code and caller-facing message for a failed publish.
///
/// Caller mistakes keep their specific message and map to 400. Storage
/// faults map to 500 with a fixed message so internal detail never leaks.
pub fn error_parts(err: &PublishError) -> (u16, String) {
    match err {
        PublishError::Validation(e) => (400, e.to_string()),
        PublishError::Archive(e) => (400, e.to_string()),
        PublishError::Encoding(e) => (400, e.to_string()),
        PublishError::Storage(_) => (500, "internal storage error".to_string()),
    }
}
