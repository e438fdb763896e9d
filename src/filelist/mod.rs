//! Framework file list
//!
//! The framework installer downloads its sources file by file. `filelist.json`
//! tells it which files exist: a nested tree of the source directory plus the
//! URL prefix each path is fetched from.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::FileListConfig;

/// A node of the source tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileNode {
    File { name: String },
    Directory { name: String, children: Vec<FileNode> },
}

impl FileNode {
    fn directory(name: &str) -> Self {
        FileNode::Directory {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FileNode::File { name } | FileNode::Directory { name, .. } => name,
        }
    }

    /// Number of files below this node
    pub fn file_count(&self) -> usize {
        match self {
            FileNode::File { .. } => 1,
            FileNode::Directory { children, .. } => children.iter().map(FileNode::file_count).sum(),
        }
    }

    /// Insert a file given its path components below this directory
    fn insert(&mut self, components: &[&str]) {
        let FileNode::Directory { children, .. } = self else {
            return;
        };
        let Some((first, rest)) = components.split_first() else {
            return;
        };

        if rest.is_empty() {
            if !children.iter().any(|c| c.name() == *first) {
                children.push(FileNode::File {
                    name: first.to_string(),
                });
            }
            return;
        }

        let index = match children
            .iter()
            .position(|c| matches!(c, FileNode::Directory { name, .. } if name.as_str() == *first))
        {
            Some(index) => index,
            None => {
                children.push(FileNode::directory(first));
                children.len() - 1
            }
        };
        children[index].insert(rest);
    }
}

/// Contents of `filelist.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    pub url: String,
    pub paths: FileNode,
}

impl FileList {
    /// Build the tree for `source_dir`, keeping files with the configured extension
    pub fn build(source_dir: &Path, config: &FileListConfig) -> Result<Self> {
        if !source_dir.is_dir() {
            return Err(anyhow!("File list source not found: {:?}", source_dir));
        }

        let root_name = source_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Invalid file list source: {:?}", source_dir))?;
        let mut root = FileNode::directory(root_name);

        for entry in WalkDir::new(source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !has_extension(path, &config.extension) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let components: Vec<&str> = relative
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect();
            root.insert(&components);
        }

        Ok(Self {
            url: config.fetch_prefix.clone(),
            paths: root,
        })
    }

    /// Indented JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Minified JSON
    pub fn to_min_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write both the indented and the minified file into `out_dir`
    pub fn write(&self, out_dir: &Path, config: &FileListConfig) -> Result<()> {
        fs::create_dir_all(out_dir)?;

        let pretty_path = out_dir.join(&config.output);
        fs::write(&pretty_path, self.to_pretty_json()?)?;
        tracing::debug!("Wrote {:?}", pretty_path);

        let min_path = out_dir.join(&config.output_min);
        fs::write(&min_path, self.to_min_json()?)?;
        tracing::debug!("Wrote {:?}", min_path);

        Ok(())
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    extension.is_empty()
        || path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false)
}
