//! Markdown rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::dedent::{normalize_with, DedentMode};
use crate::config::SiteConfig;
use crate::helpers::html_escape;

lazy_static! {
    // Loading the bundled definitions is slow; do it once per process
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Markdown renderer with syntax highlighting
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    theme_name: String,
    language: String,
    line_numbers: bool,
    dedent: DedentMode,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            theme_name: "InspiredGitHub".to_string(),
            language: "lua".to_string(),
            line_numbers: true,
            dedent: DedentMode::Legacy,
        }
    }

    /// Create a renderer from the site's highlight and markdown settings
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            theme_name: config.highlight.theme.clone(),
            language: config.highlight.language.clone(),
            line_numbers: config.highlight.line_number,
            dedent: config.markdown.dedent,
        }
    }

    /// Normalize the indentation of an embedded block, then render it
    pub fn render(&self, markdown: &str) -> String {
        let normalized = normalize_with(markdown, self.dedent);
        self.render_normalized(&normalized)
    }

    /// Render markdown that needs no indentation handling
    pub fn render_normalized(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();
        let mut heading: Option<Vec<Event>> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.trim().is_empty() => {
                            // Only the first word of the info string names the language
                            lang.split_whitespace().next().map(str::to_string)
                        }
                        _ => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref(), false);
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                Event::Start(Tag::Heading { .. }) => {
                    heading = Some(vec![event]);
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(mut buffered) = heading.take() {
                        buffered.push(event);
                        events.extend(with_heading_id(buffered));
                    }
                }
                _ => match heading.as_mut() {
                    Some(buffered) => buffered.push(event),
                    None => events.push(event),
                },
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code sample included from a file
    pub fn highlight_include(&self, code: &str) -> String {
        self.highlight_code(code, None, self.line_numbers)
    }

    /// Highlight a code block
    pub fn highlight_code(&self, code: &str, lang: Option<&str>, line_numbers: bool) -> String {
        let lang = lang.unwrap_or(&self.language);
        let syntax = find_syntax(lang);
        // The fence info string is author text and ends up in a class attribute
        let lang = &html_escape(lang);

        let Some(theme) = self.theme() else {
            tracing::warn!("No highlighting themes available, emitting plain code");
            return plain_code_block(code, lang);
        };

        match highlight_lines(code, syntax, theme) {
            Ok(lines) => {
                let style = background_style(theme);
                if line_numbers {
                    add_line_numbers(&lines, lang, &style)
                } else {
                    format!(
                        r#"<pre class="highlight language-{}"{}><code>{}</code></pre>"#,
                        lang,
                        style,
                        lines.concat()
                    )
                }
            }
            Err(e) => {
                tracing::debug!("Highlighting failed for {}: {}", lang, e);
                plain_code_block(code, lang)
            }
        }
    }

    fn theme(&self) -> Option<&'static Theme> {
        THEME_SET
            .themes
            .get(&self.theme_name)
            .or_else(|| THEME_SET.themes.values().next())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Find a syntax by token or extension, falling back to plain text
fn find_syntax(lang: &str) -> &'static SyntaxReference {
    SYNTAX_SET
        .find_syntax_by_token(lang)
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

/// Highlight code into one HTML fragment per source line
fn highlight_lines(
    code: &str,
    syntax: &SyntaxReference,
    theme: &Theme,
) -> Result<Vec<String>, syntect::Error> {
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(code) {
        let regions = highlighter.highlight_line(line, &SYNTAX_SET)?;
        lines.push(styled_line_to_highlighted_html(
            &regions[..],
            IncludeBackground::No,
        )?);
    }

    Ok(lines)
}

fn background_style(theme: &Theme) -> String {
    theme
        .settings
        .background
        .map(|c| {
            format!(
                r#" style="background-color:#{:02x}{:02x}{:02x};""#,
                c.r, c.g, c.b
            )
        })
        .unwrap_or_default()
}

/// Lay highlighted lines out next to a line-number gutter
fn add_line_numbers(lines: &[String], lang: &str, style: &str) -> String {
    let gutter: Vec<String> = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect();

    let code: Vec<&str> = lines
        .iter()
        .map(|line| line.trim_end_matches('\n'))
        .collect();

    format!(
        r#"<figure class="highlight line-numbers {}"{}><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        style,
        gutter.join("\n"),
        code.join("\n")
    )
}

fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre class="highlight language-{}"><code>{}</code></pre>"#,
        lang,
        html_escape(code)
    )
}

/// Give a buffered heading a slug id unless it already has one
fn with_heading_id(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let text: String = events
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(&**t),
            _ => None,
        })
        .collect();

    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) if !text.trim().is_empty() => Event::Start(Tag::Heading {
                level,
                id: Some(CowStr::from(slug::slugify(&text))),
                classes,
                attrs,
            }),
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_indented_block() {
        let renderer = MarkdownRenderer::new();
        let source = "\n\t\t\t\t\t# Modules\n\n\t\t\t\t\tModules are *lazy-loaded*.\n\t\t\t\t";
        let html = renderer.render(source);
        assert!(html.contains(r#"<h1 id="modules">Modules</h1>"#));
        assert!(html.contains("<em>lazy-loaded</em>"));
        assert!(!html.contains("<pre"), "prose rendered as code: {}", html);
    }

    #[test]
    fn test_heading_id_from_inline_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("### `service:Init()`");
        assert!(html.contains(r#"id="service-init""#), "{}", html);
        assert!(html.contains("<code>service:Init()</code>"));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Events {#custom}");
        assert!(html.contains(r#"id="custom""#));
    }

    #[test]
    fn test_render_code_block_defaults_to_lua() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nlocal x = 1\n```");
        assert!(html.contains("language-lua"));
        assert!(html.contains("highlight"));
        assert!(!html.contains("line-number"));
    }

    #[test]
    fn test_render_code_block_named_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("language-rust"));
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.highlight_code("a < b", Some("nosuchlang"), false);
        assert!(html.contains("language-nosuchlang"));
        assert!(html.contains("&lt;"));
    }

    #[test]
    fn test_include_has_line_numbers() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.highlight_include("local A = {}\n\nreturn A\n");
        assert!(html.contains(r#"<span class="line-number">1</span>"#));
        assert!(html.contains(r#"<span class="line-number">3</span>"#));
        assert!(!html.contains(r#"<span class="line-number">4</span>"#));
    }

    #[test]
    fn test_fence_language_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```lua\"><script>\nlocal x = 1\n```");
        assert!(html.contains(r#"language-lua&quot;&gt;&lt;script&gt;""#), "{}", html);
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_tables_enabled() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("| Property | Description |\n|---|---|\n| `Player` | Local player |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<code>Player</code>"));
    }

    #[test]
    fn test_exact_dedent_mode() {
        let mut config = SiteConfig::default();
        config.markdown.dedent = DedentMode::Exact;
        let renderer = MarkdownRenderer::from_config(&config);
        let html = renderer.render("\t\tHello *there*");
        assert!(html.contains("<p>Hello <em>there</em></p>"));
    }
}
