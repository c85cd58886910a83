//! Sync command

use anyhow::{Context, Result};
use console::style;
use swaggerkit_sync::{append_ci_env, sync_with, AssetManifest, ReleaseFeed};

use super::spinner;
use crate::cli::SyncOptions;

/// Install the latest release when it differs from the stored tag
pub async fn sync(options: SyncOptions) -> Result<()> {
    let feed = ReleaseFeed::new(&options.feed_url, options.timeout())?;
    let manifest = AssetManifest::swagger_ui();

    let pb = spinner("Checking for a new Swagger UI release...")?;
    let result = sync_with(&feed, &options.state_file, &manifest, &options.target_dir).await;
    pb.finish_and_clear();

    let outcome = result.with_context(|| format!("Sync from {} failed", options.feed_url))?;

    if outcome.changed {
        println!(
            "{} Installed Swagger UI {} into {}",
            style("✓").green().bold(),
            style(&outcome.version).cyan(),
            style(options.target_dir.display()).cyan()
        );
    } else {
        println!(
            "{} Swagger UI {} is already installed",
            style("✓").green().bold(),
            style(&outcome.version).cyan()
        );
    }

    if let Some(path) = &options.ci_env_file {
        append_ci_env(path, &outcome)
            .with_context(|| format!("Failed to export the result to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "CI environment updated");
    }

    Ok(())
}
