/// Host-naming policy for published game URLs.
///
/// When `display_host` is set (a CDN or custom domain), it is used as-is.
/// Otherwise URLs fall back to the bucket's virtual-host form
/// `{bucket}.{endpoint_host}`.
#[derive(Debug, Clone)]
pub struct HostPolicy {
    pub display_host: Option<String>,
    pub bucket: String,
    pub endpoint_host: String,
}

impl HostPolicy {
    /// The host every published game URL is served from.
    ///
    /// An empty `display_host` counts as unset.
    pub fn host(&self) -> String {
        match self.display_host.as_deref() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => format!("{}.{}", self.bucket, self.endpoint_host),
        }
    }
}

/// Builds the externally reachable URL for a game's entry point.
///
/// Joins host, storage prefix and entry path with exactly one `/` at each
/// boundary regardless of stray slashes on the inputs.
pub fn resolve_game_url(policy: &HostPolicy, oss_prefix: &str, entry_point: &str) -> String {
    let host = policy.host();
    let prefix = oss_prefix.trim_matches('/');
    let entry = entry_point.trim_start_matches('/');

    if prefix.is_empty() {
        format!("https://{host}/{entry}")
    } else {
        format!("https://{host}/{prefix}/{entry}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(display_host: Option<&str>) -> HostPolicy {
        HostPolicy {
            display_host: display_host.map(str::to_string),
            bucket: "b".to_string(),
            endpoint_host: "oss.example.com".to_string(),
        }
    }

    #[test]
    fn display_host_wins() {
        let url = resolve_game_url(&policy(Some("cdn.example.com")), "games/abc/", "index.html");
        assert_eq!(url, "https://cdn.example.com/games/abc/index.html");
    }

    #[test]
    fn falls_back_to_bucket_endpoint_host() {
        let url = resolve_game_url(&policy(None), "games/abc/", "index.html");
        assert_eq!(url, "https://b.oss.example.com/games/abc/index.html");
    }

    #[test]
    fn empty_display_host_counts_as_unset() {
        let url = resolve_game_url(&policy(Some("")), "games/abc/", "index.html");
        assert_eq!(url, "https://b.oss.example.com/games/abc/index.html");
    }

    #[test]
    fn joins_with_single_separators() {
        // Trailing prefix slash and leading entry slash must not double up.
        let url = resolve_game_url(&policy(Some("cdn.example.com")), "/games/abc/", "/index.html");
        assert_eq!(url, "https://cdn.example.com/games/abc/index.html");
    }

    #[test]
    fn bare_prefix_gains_separator() {
        let url = resolve_game_url(&policy(Some("cdn.example.com")), "games/abc", "index.html");
        assert_eq!(url, "https://cdn.example.com/games/abc/index.html");
    }

    #[test]
    fn nested_entry_point_keeps_inner_slashes() {
        let url = resolve_game_url(&policy(Some("cdn.example.com")), "games/abc/", "v2/index.html");
        assert_eq!(url, "https://cdn.example.com/games/abc/v2/index.html");
    }
}
