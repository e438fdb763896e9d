//! Built-in layout templates using the Tera template engine
//!
//! Templates are embedded in the binary, so a site needs nothing but its
//! page sources and static assets.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded layouts
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all layouts loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Page content is already HTML
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("layout/layout.html")),
            ("page.html", include_str!("layout/page.html")),
            ("not_found.html", include_str!("layout/not_found.html")),
            ("redirect.html", include_str!("layout/redirect.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("layout/partials/header.html"),
            ),
            ("partials/nav.html", include_str!("layout/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("layout/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::strip_html(&s)))
}

/// Site-wide values available to every layout
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub repository: String,
    pub root: String,
}

/// One entry of the side navigation
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub title: String,
    pub route: String,
    pub href: String,
    pub active: bool,
}

/// The page being rendered
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub route: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: "Aero <Docs>".to_string(),
                description: String::new(),
                repository: "https://github.com/example/repo".to_string(),
                root: "/".to_string(),
            },
        );
        context.insert(
            "nav",
            &vec![
                NavItem {
                    title: "Home".to_string(),
                    route: "home".to_string(),
                    href: "/home/".to_string(),
                    active: true,
                },
                NavItem {
                    title: "Services".to_string(),
                    route: "services".to_string(),
                    href: "/services/".to_string(),
                    active: false,
                },
            ],
        );
        context.insert("home_url", "/home/");
        context.insert("description", "<p>About the framework</p>");
        context.insert("generator", "");
        context.insert("favicon", "/imgs/logo_32.png");
        context.insert("stylesheets", &Vec::<String>::new());
        context.insert("generated_at", "2024-01-01");
        context
    }

    #[test]
    fn test_render_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert(
            "page",
            &PageData {
                title: "Home".to_string(),
                route: "home".to_string(),
                content: "<h1>Home</h1>".to_string(),
            },
        );

        let html = renderer.render("page.html", &context).unwrap();
        assert!(html.contains("<title>Home | Aero &lt;Docs&gt;</title>"));
        assert!(html.contains("<h1>Home</h1>"));
        assert!(html.contains(r#"class="nav-link-item active-nav" href="/home/""#));
        assert!(html.contains(r#"class="nav-link-item" href="/services/""#));
        assert!(html.contains(r#"<meta name="description" content="About the framework">"#));
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render("not_found.html", &base_context()).unwrap();
        assert!(html.contains("Sorry, the page you requested was not found."));
    }

    #[test]
    fn test_render_redirect() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("target", "/home/");
        context.insert("canonical", "http://localhost/home/");
        let html = renderer.render("redirect.html", &context).unwrap();
        assert!(html.contains(r#"<meta http-equiv="refresh" content="0; url=/home/">"#));
    }
}
