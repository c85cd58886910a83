//! CLI argument parsing

use crate::commands;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use swaggerkit_sync::SWAGGER_UI_FEED;

/// Swagger UI asset syncer - fetch the latest release into a local directory
#[derive(Parser, Debug)]
#[command(name = "swaggerkit-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    options: SyncOptions,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install the latest release if it differs from the stored one
    Sync,

    /// Show the stored and latest tags without changing anything
    Status,
}

/// Paths and feed settings shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct SyncOptions {
    /// Latest-release endpoint
    #[arg(long, global = true, env = "SWAGGERKIT_FEED_URL", default_value = SWAGGER_UI_FEED)]
    pub feed_url: String,

    /// File holding the last synced tag
    #[arg(long, global = true, env = "SWAGGERKIT_STATE_FILE", default_value = "latest_release.txt")]
    pub state_file: PathBuf,

    /// Directory the assets are installed into
    #[arg(
        long,
        global = true,
        env = "SWAGGERKIT_TARGET_DIR",
        default_value = "crates/swaggerkit-ui/resources"
    )]
    pub target_dir: PathBuf,

    /// Timeout for each network request, in seconds
    #[arg(long, global = true, env = "SWAGGERKIT_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// CI environment file to append the result to
    #[arg(long, global = true, env = "GITHUB_ENV")]
    pub ci_env_file: Option<PathBuf>,
}

impl SyncOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Commands::Sync) {
            Commands::Sync => commands::sync(self.options).await,
            Commands::Status => commands::status(self.options).await,
        }
    }
}
