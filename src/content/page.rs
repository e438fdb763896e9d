//! Page model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How a page source is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// HTML with `<markdown>` and `<codeblock>` components
    Component,
    /// The whole body is one Markdown block
    Markdown,
}

impl PageKind {
    /// Detect the kind from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("html") | Some("htm") => Some(Self::Component),
            Some("md") | Some("markdown") => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// A documentation page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page title
    pub title: String,

    /// URL path without leading or trailing slash
    pub route: String,

    /// Label in the side navigation
    pub nav_title: String,

    /// Position in the side navigation
    pub nav_order: Option<i64>,

    pub description: Option<String>,

    pub kind: PageKind,

    /// Source body after the front-matter
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file path (relative to the pages directory)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Page {
    /// Create a new page with minimal required fields
    pub fn new(title: String, route: String, source: String, kind: PageKind) -> Self {
        Self {
            nav_title: title.clone(),
            title,
            route,
            nav_order: None,
            description: None,
            kind,
            raw: String::new(),
            content: String::new(),
            source: source.clone(),
            full_source: PathBuf::from(&source),
            extra: IndexMap::new(),
        }
    }

    /// Whether the page is listed in the side navigation
    pub fn in_nav(&self) -> bool {
        self.nav_order.is_some()
    }

    /// Output file relative to the public directory
    pub fn output_path(&self) -> PathBuf {
        if self.route == "404" {
            PathBuf::from("404.html")
        } else if self.route.is_empty() {
            PathBuf::from("index.html")
        } else {
            Path::new(&self.route).join("index.html")
        }
    }
}

/// Route for a source file relative to the pages directory
///
/// `guides/install.html` becomes `guides/install`, and an `index` file takes
/// the route of its directory.
pub fn route_for(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let parts: Vec<String> = without_ext
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(str::to_string)
        .collect();

    let parts = match parts.split_last() {
        Some((last, rest)) if last == "index" => rest.to_vec(),
        _ => parts,
    };

    parts.join("/")
}

/// Normalize a front-matter route to the stored form
pub fn clean_route(route: &str) -> String {
    route.trim().trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            PageKind::from_path(Path::new("home.html")),
            Some(PageKind::Component)
        );
        assert_eq!(
            PageKind::from_path(Path::new("faq.md")),
            Some(PageKind::Markdown)
        );
        assert_eq!(PageKind::from_path(Path::new("logo.png")), None);
    }

    #[test]
    fn test_route_for() {
        assert_eq!(route_for(Path::new("home.html")), "home");
        assert_eq!(route_for(Path::new("guides/install.md")), "guides/install");
        assert_eq!(route_for(Path::new("guides/index.md")), "guides");
        assert_eq!(route_for(Path::new("index.html")), "");
    }

    #[test]
    fn test_output_path() {
        let mut page = Page::new(
            "Home".into(),
            "home".into(),
            "home.html".into(),
            PageKind::Component,
        );
        assert_eq!(page.output_path(), PathBuf::from("home/index.html"));

        page.route = "404".into();
        assert_eq!(page.output_path(), PathBuf::from("404.html"));

        page.route = String::new();
        assert_eq!(page.output_path(), PathBuf::from("index.html"));
    }

    #[test]
    fn test_clean_route() {
        assert_eq!(clean_route("/gettingstarted/"), "gettingstarted");
        assert_eq!(clean_route(" a/b "), "a/b");
    }
}
