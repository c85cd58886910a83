//! Status command

use anyhow::{Context, Result};
use console::style;
use swaggerkit_sync::{ReleaseFeed, ReleaseState};

use super::spinner;
use crate::cli::SyncOptions;

/// Print the stored and latest tags
pub async fn status(options: SyncOptions) -> Result<()> {
    let stored = ReleaseState::load(&options.state_file)?;
    let feed = ReleaseFeed::new(&options.feed_url, options.timeout())?;

    let pb = spinner("Asking the release feed...")?;
    let latest = feed.fetch_latest().await;
    pb.finish_and_clear();
    let latest = latest.with_context(|| format!("Cannot read {}", options.feed_url))?;

    println!("{}", style("Swagger UI assets:").bold());
    println!(
        "  Installed: {}",
        match &stored {
            Some(tag) => style(tag.clone()).cyan(),
            None => style("none".to_string()).yellow(),
        }
    );
    println!("  Latest:    {}", style(&latest.tag).cyan());
    println!("  Target:    {}", options.target_dir.display());
    println!();

    if stored.as_deref() == Some(latest.tag.as_str()) {
        println!("{}", style("Up to date").green());
    } else {
        println!("{}", style("A sync would install the latest release").yellow());
    }
    Ok(())
}
