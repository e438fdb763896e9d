//! Site configuration (_config.yml / _config.toml)

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::DedentMode;

/// Config file names, in lookup order
pub const CONFIG_FILES: [&str; 2] = ["_config.yml", "_config.toml"];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub repository: String,

    // URL
    pub url: String,
    pub root: String,
    /// Route the site root redirects to
    pub home: String,

    // Directory
    pub source_dir: String,
    pub pages_dir: String,
    pub public_dir: String,
    #[serde(default)]
    pub skip_copy: Vec<String>,

    // Layout
    /// Stylesheets linked from every page, relative to `css/`
    pub stylesheets: Vec<String>,
    pub favicon: Option<String>,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Tools
    #[serde(default)]
    pub filelist: FileListConfig,
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "AeroGameFramework".to_string(),
            description: String::new(),
            repository: "https://github.com/Sleitnick/AeroGameFramework".to_string(),

            url: "http://localhost".to_string(),
            root: "/".to_string(),
            home: "home".to_string(),

            source_dir: "site".to_string(),
            pages_dir: "pages".to_string(),
            public_dir: "docs".to_string(),
            skip_copy: Vec::new(),

            stylesheets: vec!["main".to_string()],
            favicon: Some("imgs/logo_32.png".to_string()),

            highlight: HighlightConfig::default(),
            markdown: MarkdownConfig::default(),

            filelist: FileListConfig::default(),
            server: ServerConfig::default(),

            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, picking the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse {:?}: {}", path, e))?,
            _ => {
                // An empty YAML document deserializes to unit, not a mapping
                if content.trim().is_empty() {
                    SiteConfig::default()
                } else {
                    serde_yaml::from_str(&content)
                        .map_err(|e| anyhow!("Failed to parse {:?}: {}", path, e))?
                }
            }
        };

        Ok(config)
    }

    /// Find the config file in a site directory, if any
    pub fn locate<P: AsRef<Path>>(base_dir: P) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.as_ref().join(name))
            .find(|path| path.exists())
    }

    /// Home route normalized to a bare path segment
    pub fn home_route(&self) -> &str {
        self.home.trim_matches('/')
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Language used for code includes and unlabelled fences
    pub language: String,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            language: "lua".to_string(),
            theme: "InspiredGitHub".to_string(),
            line_number: true,
        }
    }
}

/// Markdown preprocessing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub dedent: DedentMode,
}

/// File list builder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileListConfig {
    /// Directory (relative to the site root) the tree is built from
    pub source: String,
    pub fetch_prefix: String,
    /// Extension of the files kept in the tree
    pub extension: String,
    pub output: String,
    pub output_min: String,
}

impl Default for FileListConfig {
    fn default() -> Self {
        Self {
            source: "src".to_string(),
            fetch_prefix: "https://raw.githubusercontent.com/Sleitnick/AeroGameFramework/master/"
                .to_string(),
            extension: "lua".to_string(),
            output: "filelist.json".to_string(),
            output_min: "filelist.min.json".to_string(),
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "AeroGameFramework");
        assert_eq!(config.public_dir, "docs");
        assert_eq!(config.highlight.language, "lua");
        assert_eq!(config.markdown.dedent, DedentMode::Legacy);
        assert_eq!(config.home_route(), "home");
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
title: My Docs
home: /start/
highlight:
  language: rust
markdown:
  dedent: exact
discord: https://discord.gg/example
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Docs");
        assert_eq!(config.home_route(), "start");
        assert_eq!(config.highlight.language, "rust");
        assert!(config.highlight.line_number);
        assert_eq!(config.markdown.dedent, DedentMode::Exact);
        assert!(config.extra.contains_key("discord"));
    }

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.toml");
        fs::write(
            &path,
            "title = \"Toml Docs\"\npublic_dir = \"out\"\n\n[server]\nport = 8080\n",
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Toml Docs");
        assert_eq!(config.public_dir, "out");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.source_dir, "site");
    }

    #[test]
    fn test_locate_prefers_yaml() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::locate(dir.path()).is_none());

        fs::write(dir.path().join("_config.toml"), "").unwrap();
        fs::write(dir.path().join("_config.yml"), "").unwrap();
        let found = SiteConfig::locate(dir.path()).unwrap();
        assert!(found.ends_with("_config.yml"));
    }
}
