//! Content loader - loads and renders pages from the pages directory

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::component::{render_component_page, render_markdown_page};
use super::page::{clean_route, route_for};
use super::{FrontMatter, MarkdownRenderer, Page, PageKind};
use crate::error::PageError;
use crate::Site;

/// Loads content from the pages directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::from_config(&site.config);
        Self { site, renderer }
    }

    /// Load and render every page, ordered for navigation
    ///
    /// Pages that fail to load are logged and skipped. Two pages claiming the
    /// same route fail the whole load.
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let pages_dir = &self.site.pages_dir;
        if !pages_dir.exists() {
            tracing::warn!("Pages directory not found: {:?}", pages_dir);
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(pages_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            let relative = path.strip_prefix(pages_dir).unwrap_or(path);

            let hidden = relative.components().any(|c| {
                c.as_os_str()
                    .to_str()
                    .map(|s| s.starts_with('_') || s.starts_with('.'))
                    .unwrap_or(false)
            });
            if hidden || !path.is_file() {
                continue;
            }

            let Some(kind) = PageKind::from_path(path) else {
                continue;
            };

            match self.load_page(path, relative, kind) {
                Ok(page) => pages.push(page),
                Err(e) => {
                    tracing::warn!("Failed to load page {:?}: {}", path, e);
                }
            }
        }

        check_routes(&pages)?;
        sort_pages(&mut pages);

        Ok(pages)
    }

    /// Load a single page from a file
    fn load_page(&self, path: &Path, relative: &Path, kind: PageKind) -> Result<Page> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let route = fm
            .route
            .as_deref()
            .map(clean_route)
            .unwrap_or_else(|| route_for(relative));

        let title = fm.title.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let source = relative.to_string_lossy().replace('\\', "/");

        let content_html = match kind {
            PageKind::Component => {
                render_component_page(body, &self.renderer, &self.site.source_dir)?
            }
            PageKind::Markdown => render_markdown_page(body, &self.renderer),
        };

        let mut page = Page::new(title, route, source, kind);
        if let Some(nav_title) = fm.nav_title {
            page.nav_title = nav_title;
        }
        page.nav_order = fm.nav_order;
        page.description = fm.description;
        page.raw = body.to_string();
        page.content = content_html;
        page.full_source = path.to_path_buf();
        page.extra = fm.extra;

        tracing::debug!("Loaded page {} -> /{}", page.source, page.route);
        Ok(page)
    }
}

/// Fail on two pages publishing to the same route
fn check_routes(pages: &[Page]) -> Result<(), PageError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for page in pages {
        if let Some(first) = seen.insert(&page.route, &page.source) {
            return Err(PageError::DuplicateRoute {
                route: page.route.clone(),
                first: first.to_string(),
                second: page.source.clone(),
            });
        }
    }
    Ok(())
}

/// Navigation pages first by `nav_order`, then everything else by route
fn sort_pages(pages: &mut [Page]) {
    pages.sort_by(|a, b| match (a.nav_order, b.nav_order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.route.cmp(&b.route)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.route.cmp(&b.route),
    });
}
