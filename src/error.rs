//! Error types for page sources

use std::path::PathBuf;
use thiserror::Error;

/// Problems found while parsing or rendering a page source
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Unclosed <markdown> block starting at line {line}")]
    UnclosedMarkdown { line: usize },

    #[error("<codeblock> at line {line} is missing a src attribute")]
    MissingSrc { line: usize },

    #[error("Included file not found: {0:?}")]
    IncludeNotFound(PathBuf),

    #[error("Duplicate route '{route}' in {first} and {second}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
