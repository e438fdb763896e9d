//! Component page parsing
//!
//! A component page is raw HTML with two embedded components:
//!
//! - `<markdown> ... </markdown>`: an indented Markdown block
//! - `<codeblock src="lua/sample.lua"/>`: a highlighted code sample read from
//!   the source directory
//!
//! Tag names are matched case-insensitively.

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

use super::MarkdownRenderer;
use crate::error::PageError;
use crate::helpers::html_escape;

lazy_static! {
    static ref COMPONENT_RE: Regex =
        Regex::new(r"(?is)<markdown\s*>|<codeblock\b([^>]*?)/?>(?:\s*</codeblock\s*>)?")
            .expect("component pattern is valid");
    static ref MARKDOWN_END_RE: Regex =
        Regex::new(r"(?i)</markdown\s*>").expect("closing pattern is valid");
    static ref SRC_ATTR_RE: Regex =
        Regex::new(r#"(?i)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("src pattern is valid");
}

/// A piece of a component page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Passed through verbatim
    Html(&'a str),
    /// Inner text of a `<markdown>` block, indentation untouched
    Markdown { text: &'a str, line: usize },
    /// A `<codeblock>` include
    CodeBlock { src: String, line: usize },
}

/// Split a component page body into segments
pub fn parse_segments(body: &str) -> Result<Vec<Segment<'_>>, PageError> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(caps) = COMPONENT_RE.captures_at(body, pos) {
        let Some(tag) = caps.get(0) else {
            break;
        };

        if tag.start() > pos {
            segments.push(Segment::Html(&body[pos..tag.start()]));
        }

        let line = line_at(body, tag.start());

        if tag.as_str().get(..9).is_some_and(|t| t.eq_ignore_ascii_case("<markdown")) {
            let close = MARKDOWN_END_RE
                .find_at(body, tag.end())
                .ok_or(PageError::UnclosedMarkdown { line })?;
            segments.push(Segment::Markdown {
                text: &body[tag.end()..close.start()],
                line,
            });
            pos = close.end();
        } else {
            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let src = SRC_ATTR_RE
                .captures(attrs)
                .and_then(|c| c.get(1).or_else(|| c.get(2)))
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or(PageError::MissingSrc { line })?;
            segments.push(Segment::CodeBlock { src, line });
            pos = tag.end();
        }
    }

    if pos < body.len() {
        segments.push(Segment::Html(&body[pos..]));
    }

    Ok(segments)
}

/// Render a component page body to HTML
pub fn render_component_page(
    body: &str,
    renderer: &MarkdownRenderer,
    source_dir: &Path,
) -> Result<String, PageError> {
    let mut html = String::with_capacity(body.len() * 2);

    for segment in parse_segments(body)? {
        match segment {
            Segment::Html(raw) => html.push_str(raw),
            Segment::Markdown { text, .. } => {
                html.push_str(&render_markdown_block(text, renderer));
            }
            Segment::CodeBlock { src, .. } => {
                html.push_str(&render_code_include(&src, renderer, source_dir)?);
            }
        }
    }

    Ok(html)
}

/// Render one embedded Markdown block into the content wrapper
pub fn render_markdown_block(text: &str, renderer: &MarkdownRenderer) -> String {
    format!(r#"<div class="markdown">{}</div>"#, renderer.render(text))
}

/// Render a whole `.md` page into the content wrapper
///
/// Standalone Markdown is not nested in markup, so its tabs are content and
/// the indentation is left alone.
pub fn render_markdown_page(body: &str, renderer: &MarkdownRenderer) -> String {
    format!(
        r#"<div class="markdown">{}</div>"#,
        renderer.render_normalized(body)
    )
}

/// Read, highlight and wrap a code sample
fn render_code_include(
    src: &str,
    renderer: &MarkdownRenderer,
    source_dir: &Path,
) -> Result<String, PageError> {
    let path = source_dir.join(src.trim_start_matches('/'));
    if !path.is_file() {
        return Err(PageError::IncludeNotFound(path));
    }

    let code = fs::read_to_string(&path)?;
    tracing::debug!("Included code sample {:?}", path);

    Ok(format!(
        r#"<div class="code-block" data-src="{}">{}</div>"#,
        html_escape(src),
        renderer.highlight_include(&code)
    ))
}

/// 1-based line number of a byte offset
fn line_at(body: &str, offset: usize) -> usize {
    body[..offset].matches('\n').count() + 1
}
