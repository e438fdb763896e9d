//! Content module - handles pages, components and Markdown processing

pub mod component;
mod dedent;
mod frontmatter;
pub mod loader;
mod markdown;
mod page;

pub use dedent::{leading_tabs, normalize, normalize_with, DedentMode};
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use page::{clean_route, route_for, Page, PageKind};
