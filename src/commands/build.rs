//! Build the static site

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::{GenerateReport, Generator};
use crate::Site;

/// Render every page and write the public directory
pub fn run(site: &Site) -> Result<()> {
    build(site).map(|_| ())
}

/// Same as [`run`], returning what was written
pub fn build(site: &Site) -> Result<GenerateReport> {
    let start = Instant::now();

    let loader = ContentLoader::new(site);
    let pages = loader.load_pages()?;
    tracing::info!("Loaded {} pages", pages.len());

    let generator = Generator::new(site)?;
    let report = generator.generate(&pages)?;

    tracing::info!(
        "Generated {} pages and copied {} assets in {:.2}s",
        report.pages,
        report.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Watch the sources and rebuild on change
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if site.source_dir.exists() {
        watcher.watch(&site.source_dir, notify::RecursiveMode::Recursive)?;
    }
    if let Some(config_path) = &site.config_path {
        watcher.watch(config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                // Writes into the public directory must not trigger another build
                if event.paths.iter().all(|p| p.starts_with(&site.public_dir)) {
                    continue;
                }
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, rebuilding...");
                    // Config edits can move directories, so reload the site first
                    let result = Site::new(&site.base_dir).and_then(|fresh| run(&fresh));
                    if let Err(e) = result {
                        tracing::error!("Build failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
