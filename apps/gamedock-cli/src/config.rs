//! CLI configuration.
//!
//! Reads TOML from `--config` or `./gamedock.toml`. A missing default file
//! means built-in defaults; an explicitly given path must exist, and any
//! file that fails to parse is an error.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use gamedock_publish::HostPolicy;

const DEFAULT_CONFIG_FILE: &str = "gamedock.toml";

/// On-disk config format. Every field is optional; absent fields keep
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    display_host: Option<String>,
    bucket: Option<String>,
    endpoint_host: Option<String>,
    store_root: Option<PathBuf>,
}

/// Runtime CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub display_host: Option<String>,
    pub bucket: String,
    pub endpoint_host: String,
    pub store_root: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            display_host: None,
            bucket: "gamedock-games".into(),
            endpoint_host: "oss-accelerate.aliyuncs.com".into(),
            store_root: PathBuf::from("gamedock-data"),
        }
    }
}

impl CliConfig {
    /// Loads configuration, layering file values over defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (file_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let mut config = Self::default();

        if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)
                .with_context(|| format!("failed to read config {}", file_path.display()))?;
            let file: ConfigFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse config {}", file_path.display()))?;

            if let Some(display_host) = file.display_host {
                config.display_host = Some(display_host);
            }
            if let Some(bucket) = file.bucket {
                config.bucket = bucket;
            }
            if let Some(endpoint_host) = file.endpoint_host {
                config.endpoint_host = endpoint_host;
            }
            if let Some(store_root) = file.store_root {
                config.store_root = store_root;
            }
        } else if explicit {
            anyhow::bail!("config file not found: {}", file_path.display());
        }

        Ok(config)
    }

    /// Host-naming policy handed to the publish pipeline.
    pub fn host_policy(&self) -> HostPolicy {
        HostPolicy {
            display_host: self.display_host.clone(),
            bucket: self.bucket.clone(),
            endpoint_host: self.endpoint_host.clone(),
        }
    }
}
