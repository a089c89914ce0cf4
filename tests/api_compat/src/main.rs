fn main() {
    println!("Run `cargo test -p api-compat` to execute API compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values so field names and optional-field handling stay locked
    /// to the published API shapes.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
    }

    // --- Record and envelope fixtures ---

    #[test]
    fn fixture_game_record() {
        roundtrip_test::<gamedock_publish::GameRecord>("game_record.json");
    }

    #[test]
    fn fixture_publish_response_success() {
        roundtrip_test::<gamedock_publish::ApiResponse>("publish_response_success.json");
    }

    #[test]
    fn fixture_publish_response_error() {
        roundtrip_test::<gamedock_publish::ApiResponse>("publish_response_error.json");
    }

    #[test]
    fn fixture_success_envelope_fields() {
        let fixture = load_fixture("publish_response_success.json");
        let response: gamedock_publish::ApiResponse =
            serde_json::from_value(fixture).unwrap();

        assert!(response.success);
        assert!(response.error.is_none());
        let record = response.data.expect("success envelope carries a record");
        assert_eq!(record.status, gamedock_publish::GameStatus::Published);
        assert_eq!(record.view_count, 0);
        assert_eq!(record.like_count, 0);
        assert!(record.game_url.ends_with("/index.html"));
    }

    // --- Request shapes ---

    #[test]
    fn fixture_publish_request() {
        roundtrip_test::<gamedock_publish::PublishRequest>("publish_request.json");
    }

    #[test]
    fn fixture_file_spec_text() {
        roundtrip_test::<gamedock_bundle::FileSpec>("file_spec_text.json");
    }

    #[test]
    fn fixture_file_spec_base64() {
        roundtrip_test::<gamedock_bundle::FileSpec>("file_spec_base64.json");
    }

    // --- Backward compatibility: optional fields ---

    #[test]
    fn request_without_description_defaults_to_empty() {
        let json = r#"{"title": "Bare Minimum"}"#;
        let request: gamedock_publish::PublishRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "Bare Minimum");
        assert_eq!(request.description, "");
    }

    #[test]
    fn file_spec_without_sources_parses() {
        // Sourceless entries are valid on the wire; the reader skips them.
        let json = r#"{"path": "notes.txt"}"#;
        let spec: gamedock_bundle::FileSpec = serde_json::from_str(json).unwrap();
        assert!(spec.content.is_none());
        assert!(spec.content_base64.is_none());
    }

    #[test]
    fn error_envelope_has_no_data_field() {
        let fixture = load_fixture("publish_response_error.json");
        let response: gamedock_publish::ApiResponse =
            serde_json::from_value(fixture).unwrap();

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(
            response.error.as_deref(),
            Some("index.html is required as entry point")
        );

        // Re-serialization must keep `data` absent rather than null.
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("data").is_none());
    }
}
