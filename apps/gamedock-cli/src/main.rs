//! GameDock CLI.
//!
//! Publishes HTML5 game bundles either from a zip archive or from a game
//! directory sent as an explicit file list. Prints the response envelope
//! as JSON on stdout; logs go to stderr.
//!
//! Exit codes: 0 on success, 1 when the publish is rejected or fails,
//! 2 for usage and environment errors.

mod config;
mod files;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gamedock_publish::{
    ApiResponse, GameRecord, PublishError, PublishRequest, Publisher, error_parts,
};
use gamedock_store::FsStore;

use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "gamedock", version, about = "Publish HTML5 game bundles")]
struct Cli {
    /// Path to a config file (defaults to ./gamedock.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where published bundles are written (overrides the config file).
    #[arg(long, global = true)]
    store_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish a zipped game bundle.
    UploadZip {
        /// Path to the .zip archive.
        zip: PathBuf,

        /// Game title.
        #[arg(long)]
        title: String,

        /// Optional description shown alongside the game.
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Publish a game directory as an explicit file list.
    PublishFiles {
        /// Directory with the game's files (index.html at its root).
        dir: PathBuf,

        /// Game title.
        #[arg(long)]
        title: String,

        /// Optional description shown alongside the game.
        #[arg(long, default_value = "")]
        description: String,

        /// Send UTF-8 readable files as inline text instead of base64.
        #[arg(long, default_value_t = false)]
        prefer_text: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gamedock=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            // Usage and environment problems, as opposed to rejected publishes.
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut cfg = CliConfig::load(cli.config.as_deref())?;
    if let Some(root) = cli.store_root {
        cfg.store_root = root;
    }
    let store = FsStore::new(&cfg.store_root);
    let publisher = Publisher::new(&store, cfg.host_policy());
    let request_id = uuid::Uuid::new_v4().to_string();

    let outcome = match cli.command {
        Command::UploadZip {
            zip,
            title,
            description,
        } => {
            if !zip.is_file() {
                anyhow::bail!("zip file not found: {}", zip.display());
            }
            let is_zip = zip
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
            if !is_zip {
                anyhow::bail!("only .zip archives are supported: {}", zip.display());
            }

            let filename = zip
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let data = std::fs::read(&zip)
                .with_context(|| format!("failed to read {}", zip.display()))?;
            info!(
                request_id = %request_id,
                archive = %filename,
                bytes = data.len(),
                "publishing zip bundle"
            );

            let request = PublishRequest::new(title, description);
            publisher.publish_archive(&filename, &data, &request).await
        }

        Command::PublishFiles {
            dir,
            title,
            description,
            prefer_text,
        } => {
            if !dir.is_dir() {
                anyhow::bail!("game directory not found: {}", dir.display());
            }
            if !dir.join("index.html").is_file() {
                anyhow::bail!("index.html not found at the root of {}", dir.display());
            }

            let specs = files::scan_dir(&dir, prefer_text)?;
            info!(
                request_id = %request_id,
                files = specs.len(),
                "publishing file list"
            );

            let request = PublishRequest::new(title, description);
            publisher.publish_files(&request, specs).await
        }
    };

    report(&request_id, outcome)
}

/// Prints the response envelope and maps the outcome to an exit code.
fn report(
    request_id: &str,
    outcome: Result<GameRecord, PublishError>,
) -> anyhow::Result<ExitCode> {
    match outcome {
        Ok(record) => {
            info!(
                request_id = %request_id,
                game_id = %record.id,
                url = %record.game_url,
                "publish succeeded"
            );
            println!("{}", serde_json::to_string_pretty(&ApiResponse::ok(record))?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let (status, _) = error_parts(&err);
            warn!(
                request_id = %request_id,
                status,
                error = %err,
                "publish failed"
            );
            println!("{}", serde_json::to_string_pretty(&ApiResponse::failed(&err))?);
            Ok(ExitCode::from(if status >= 400 { 1 } else { 0 }))
        }
    }
}
