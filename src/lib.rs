//! aerodocs: static documentation site generator for AeroGameFramework
//!
//! Page sources are HTML fragments with embedded, tab-indented Markdown
//! blocks and Lua code-sample includes. They are rendered with pulldown-cmark
//! and syntect into Tera layouts and written out as a static site.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod filelist;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main documentation site handle
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Config file, if the site has one
    pub config_path: Option<PathBuf>,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory (pages, images, code samples, stylesheets)
    pub source_dir: PathBuf,
    /// Page sources
    pub pages_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = config::SiteConfig::locate(&base_dir);

        let config = match &config_path {
            Some(path) => config::SiteConfig::load(path)?,
            None => config::SiteConfig::default(),
        };

        let source_dir = base_dir.join(&config.source_dir);
        let pages_dir = source_dir.join(&config.pages_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            config_path,
            base_dir,
            source_dir,
            pages_dir,
            public_dir,
        })
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Write the framework file list
    pub fn build_filelist(&self) -> Result<()> {
        commands::filelist::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_site_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(site.config_path.is_none());
        assert_eq!(site.source_dir, dir.path().join("site"));
        assert_eq!(site.pages_dir, dir.path().join("site/pages"));
        assert_eq!(site.public_dir, dir.path().join("docs"));
    }

    #[test]
    fn test_site_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "source_dir: content\npages_dir: p\npublic_dir: out\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert!(site.config_path.is_some());
        assert_eq!(site.pages_dir, dir.path().join("content/p"));
        assert_eq!(site.public_dir, dir.path().join("out"));
    }
}
