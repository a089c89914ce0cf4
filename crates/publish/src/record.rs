use serde::{Deserialize, Serialize};

use gamedock_bundle::{ENTRY_POINT, NormalizedBundle};

use crate::url::{HostPolicy, resolve_game_url};

/// Caller-supplied metadata for a publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl PublishRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Lifecycle state of a published game.
///
/// Publishing only ever produces `Published`; the other states belong to
/// moderation flows outside this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Published,
}

/// Public record returned for every successful publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub game_url: String,
    pub oss_prefix: String,
    pub file_count: i32,
    pub total_size: i64,
    pub status: GameStatus,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Allocates a globally unique game identifier.
pub fn allocate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Storage key namespace for a game's files, always slash-terminated.
pub fn oss_prefix(id: &str) -> String {
    format!("games/{id}/")
}

impl GameRecord {
    /// Assembles the record for a validated, already-stored bundle.
    ///
    /// A fresh record starts with zeroed engagement counters and identical
    /// creation and update stamps.
    pub fn build(
        id: String,
        oss_prefix: String,
        request: &PublishRequest,
        bundle: &NormalizedBundle,
        policy: &HostPolicy,
    ) -> Self {
        let entry_point = bundle.entry_point.as_deref().unwrap_or(ENTRY_POINT);
        let game_url = resolve_game_url(policy, &oss_prefix, entry_point);
        let now = chrono::Utc::now().to_rfc3339();

        Self {
            id,
            title: request.title.clone(),
            description: request.description.clone(),
            game_url,
            oss_prefix,
            file_count: bundle.file_count,
            total_size: bundle.total_size,
            status: GameStatus::Published,
            view_count: 0,
            like_count: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedock_bundle::{BundleFile, assemble};

    fn policy() -> HostPolicy {
        HostPolicy {
            display_host: None,
            bucket: "b".to_string(),
            endpoint_host: "oss.example.com".to_string(),
        }
    }

    fn bundle() -> NormalizedBundle {
        assemble(vec![
            BundleFile {
                path: "index.html".to_string(),
                bytes: b"<html></html>".to_vec(),
            },
            BundleFile {
                path: "game.js".to_string(),
                bytes: vec![1, 2, 3],
            },
        ])
    }

    #[test]
    fn allocated_ids_are_unique() {
        let a = allocate_id();
        let b = allocate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn prefix_is_slash_terminated() {
        assert_eq!(oss_prefix("abc"), "games/abc/");
    }

    #[test]
    fn fresh_record_shape() {
        let request = PublishRequest::new("My Game", "a demo");
        let record = GameRecord::build(
            "abc".to_string(),
            oss_prefix("abc"),
            &request,
            &bundle(),
            &policy(),
        );

        assert_eq!(record.id, "abc");
        assert_eq!(record.title, "My Game");
        assert_eq!(record.description, "a demo");
        assert_eq!(record.oss_prefix, "games/abc/");
        assert_eq!(record.game_url, "https://b.oss.example.com/games/abc/index.html");
        assert_eq!(record.file_count, 2);
        assert_eq!(record.total_size, 16);
        assert_eq!(record.status, GameStatus::Published);
        assert_eq!(record.view_count, 0);
        assert_eq!(record.like_count, 0);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let request = PublishRequest::new("My Game", "");
        let record = GameRecord::build(
            "abc".to_string(),
            oss_prefix("abc"),
            &request,
            &bundle(),
            &policy(),
        );

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "id",
            "title",
            "description",
            "gameUrl",
            "ossPrefix",
            "fileCount",
            "totalSize",
            "status",
            "viewCount",
            "likeCount",
            "createdAt",
            "updatedAt",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(value["status"], "published");
    }
}
