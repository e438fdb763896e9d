//! Generator module - writes the static site using the built-in Tera layouts

use anyhow::Result;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::Page;
use crate::helpers::{css, full_url_for, meta_generator, route_url, summarize, url_for};
use crate::templates::{NavItem, PageData, SiteData, TemplateRenderer};
use crate::Site;

/// Length of descriptions derived from page content
const SUMMARY_LENGTH: usize = 160;

/// What a generation run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    skip_patterns: Vec<glob::Pattern>,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        let mut skip_patterns = Vec::new();
        for pattern in &site.config.skip_copy {
            skip_patterns.push(glob::Pattern::new(pattern)?);
        }

        Ok(Self {
            site: site.clone(),
            renderer,
            skip_patterns,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, pages: &[Page]) -> Result<GenerateReport> {
        fs::create_dir_all(&self.site.public_dir)?;

        let assets = self.copy_assets()?;

        for page in pages {
            self.generate_page(page, pages)?;
        }

        if !pages.iter().any(|p| p.route.is_empty()) {
            self.generate_redirect()?;
        }

        if !pages.iter().any(|p| p.route == "404") {
            self.generate_not_found(pages)?;
        }

        Ok(GenerateReport {
            pages: pages.len(),
            assets,
        })
    }

    /// Render one page to `<route>/index.html`
    fn generate_page(&self, page: &Page, pages: &[Page]) -> Result<()> {
        let description = page
            .description
            .clone()
            .unwrap_or_else(|| summarize(&page.content, SUMMARY_LENGTH));

        let mut context = self.create_base_context(pages, &page.route, &description);
        context.insert(
            "page",
            &PageData {
                title: page.title.clone(),
                route: page.route.clone(),
                content: page.content.clone(),
            },
        );

        let html = self.renderer.render("page.html", &context)?;
        let output_path = self.site.public_dir.join(page.output_path());
        write_file(&output_path, &html)?;
        tracing::debug!("Generated page: {:?}", output_path);

        Ok(())
    }

    /// Root `index.html` sending visitors to the home route
    fn generate_redirect(&self) -> Result<()> {
        let home = self.site.config.home_route();
        let target = route_url(&self.site.config, home);

        let mut context = Context::new();
        context.insert("site", &self.site_data());
        context.insert("target", &target);
        context.insert("canonical", &full_url_for(&self.site.config, &target_path(home)));

        let html = self.renderer.render("redirect.html", &context)?;
        let output_path = self.site.public_dir.join("index.html");
        write_file(&output_path, &html)?;
        tracing::debug!("Generated redirect: {:?} -> {}", output_path, target);

        Ok(())
    }

    /// Built-in `404.html` for sites without their own
    fn generate_not_found(&self, pages: &[Page]) -> Result<()> {
        let context = self.create_base_context(pages, "404", "");
        let html = self.renderer.render("not_found.html", &context)?;
        let output_path = self.site.public_dir.join("404.html");
        write_file(&output_path, &html)?;
        tracing::debug!("Generated not-found page: {:?}", output_path);

        Ok(())
    }

    fn site_data(&self) -> SiteData {
        let config = &self.site.config;
        SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            repository: config.repository.clone(),
            root: config.root.clone(),
        }
    }

    /// Context shared by every layout
    fn create_base_context(&self, pages: &[Page], current_route: &str, description: &str) -> Context {
        let config = &self.site.config;
        let description = if description.is_empty() {
            config.description.as_str()
        } else {
            description
        };

        let stylesheets: Vec<String> = config
            .stylesheets
            .iter()
            .map(|sheet| css(config, sheet))
            .collect();

        let mut context = Context::new();
        context.insert("site", &self.site_data());
        context.insert("nav", &build_nav(&self.site, pages, current_route));
        context.insert("home_url", &route_url(config, config.home_route()));
        context.insert("description", description);
        context.insert("generator", &meta_generator());
        context.insert(
            "favicon",
            &config.favicon.as_deref().map(|f| url_for(config, f)),
        );
        context.insert("stylesheets", &stylesheets);
        context.insert(
            "generated_at",
            &chrono::Local::now().format("%Y-%m-%d").to_string(),
        );
        context
    }

    /// Copy every non-page file of the source directory to the public directory
    fn copy_assets(&self) -> Result<usize> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file()
                || path.starts_with(&self.site.pages_dir)
                || path.starts_with(&self.site.public_dir)
            {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            if self.should_skip(relative) {
                continue;
            }

            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            tracing::debug!("Copied: {:?} -> {:?}", path, dest);
            copied += 1;
        }

        Ok(copied)
    }

    /// Files under `_`/`.` directories and `skip_copy` matches stay behind
    fn should_skip(&self, relative: &Path) -> bool {
        let hidden = relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|s| s.starts_with('_') || s.starts_with('.'))
                .unwrap_or(false)
        });

        hidden
            || self
                .skip_patterns
                .iter()
                .any(|pattern| pattern.matches_path(relative))
    }
}

/// Side navigation for the page at `current_route`
pub fn build_nav(site: &Site, pages: &[Page], current_route: &str) -> Vec<NavItem> {
    pages
        .iter()
        .filter(|p| p.in_nav())
        .map(|p| NavItem {
            title: p.nav_title.clone(),
            route: p.route.clone(),
            href: route_url(&site.config, &p.route),
            active: p.route == current_route,
        })
        .collect()
}

fn target_path(route: &str) -> String {
    if route.is_empty() {
        String::new()
    } else {
        format!("{}/", route)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }
    fs::write(path, content).map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))
}
