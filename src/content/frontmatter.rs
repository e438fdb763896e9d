//! Front-matter parsing

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Front-matter data from a page source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    /// URL path the page is published under
    pub route: Option<String>,
    /// Label in the side navigation
    pub nav_title: Option<String>,
    /// Position in the side navigation; pages without one are not listed
    pub nav_order: Option<i64>,
    pub description: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let trimmed = content.trim_start();

        if trimmed.starts_with("---") {
            return Self::parse_yaml(trimmed, content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml<'a>(trimmed: &'a str, original: &'a str) -> Result<(Self, &'a str)> {
        let rest = &trimmed[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return Ok((FrontMatter::default(), original));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A `---` rule at the top of a Markdown page is not front-matter
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return Ok((FrontMatter::default(), original));
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => Ok((fm, remaining)),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                Ok((FrontMatter::default(), original))
            }
        }
    }
}

/// Whether a line has the `key: value` shape of a YAML mapping entry
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }

    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };

    let key = &trimmed[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");

    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Controllers
route: controllers
nav_order: 4
---

<markdown>
	# Controllers
</markdown>
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Controllers".to_string()));
        assert_eq!(fm.route, Some("controllers".to_string()));
        assert_eq!(fm.nav_order, Some(4));
        assert!(fm.nav_title.is_none());
        assert!(remaining.starts_with("<markdown>"));
    }

    #[test]
    fn test_no_frontmatter_keeps_indentation() {
        let content = "\t\t# Title\n\t\tBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_markdown_rule_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and the docs

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_extra_fields() {
        let content = "---\ntitle: Home\nbanner: logo.png\n---\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Home"));
        assert_eq!(
            fm.extra.get("banner").and_then(|v| v.as_str()),
            Some("logo.png")
        );
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_unclosed_frontmatter_is_content() {
        let content = "---\ntitle: Broken\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, content);
    }
}
