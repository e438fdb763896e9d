//! Initialize a new documentation site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILES;

const CONFIG: &str = r#"# aerodocs configuration

# Site
title: AeroGameFramework
description: A powerful game framework for Roblox
repository: https://github.com/Sleitnick/AeroGameFramework

# URL
url: http://localhost
root: /
home: home

# Directory
source_dir: site
pages_dir: pages
public_dir: docs
skip_copy: []

# Layout
stylesheets:
  - main
favicon: imgs/logo_32.png

# Rendering
highlight:
  language: lua
  theme: InspiredGitHub
  line_number: true
markdown:
  # legacy | exact
  dedent: legacy

# File list
filelist:
  source: src
  fetch_prefix: https://raw.githubusercontent.com/Sleitnick/AeroGameFramework/master/
  extension: lua

# Server
server:
  ip: localhost
  port: 4000
"#;

const HOME_PAGE: &str = r#"---
title: Home
nav_order: 1
description: AeroGameFramework documentation
---
<div class="hero">
	<markdown>
		# AeroGameFramework

		AeroGameFramework is a Roblox game framework that makes development easy and fun.

		- Servers, controllers and modules are loaded for you
		- Services expose client-facing methods and events
		- Everything is lazy-loaded
	</markdown>
</div>
"#;

const SERVICES_PAGE: &str = r#"---
title: Services
nav_order: 2
---
<div class="section">
	<markdown>
		# Services

		Services are singleton modules that run on the server. A service is
		created by adding a module under `ServerStorage/Aero/Services`:
	</markdown>
	<codeblock src="lua/service_01.lua"/>
	<markdown>
		Every service gets an `Init` and a `Start` method called by the framework.
	</markdown>
</div>
"#;

const SERVICE_SAMPLE: &str = r#"local MyService = {Client = {}}

function MyService:Start()
	print("Started")
end

function MyService:Init()
	self:RegisterClientEvent("Hello")
end

return MyService
"#;

const STYLESHEET: &str = r#"body {
	margin: 0;
	font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
}

.header {
	padding: 1rem 2rem;
	background: #2d2d2d;
}

.header a {
	color: #fff;
	text-decoration: none;
}

.nav-link-item {
	display: block;
	padding: 0.25rem 1rem;
}

.active-nav {
	font-weight: bold;
}

.code-block table.code {
	border-collapse: collapse;
}

.code-block .gutter {
	padding-right: 1em;
	color: #999;
	user-select: none;
	text-align: right;
}
"#;

/// Scaffold a new site in `target_dir`
///
/// Refuses to touch a directory that already has a config file.
pub fn init_site(target_dir: &Path) -> Result<()> {
    if let Some(existing) = CONFIG_FILES
        .iter()
        .map(|name| target_dir.join(name))
        .find(|path| path.exists())
    {
        bail!("Site already initialized: {:?} exists", existing);
    }

    let source = target_dir.join("site");
    fs::create_dir_all(source.join("pages"))?;
    fs::create_dir_all(source.join("lua"))?;
    fs::create_dir_all(source.join("css"))?;
    fs::create_dir_all(source.join("imgs"))?;

    fs::write(target_dir.join("_config.yml"), CONFIG)?;
    fs::write(source.join("pages/home.html"), HOME_PAGE)?;
    fs::write(source.join("pages/services.html"), SERVICES_PAGE)?;
    fs::write(source.join("lua/service_01.lua"), SERVICE_SAMPLE)?;
    fs::write(source.join("css/main.css"), STYLESHEET)?;

    tracing::debug!("Scaffolded site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::Site;

    #[test]
    fn test_init_site_builds() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.description, "A powerful game framework for Roblox");

        let pages = ContentLoader::new(&site).load_pages().unwrap();
        let routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(routes, vec!["home", "services"]);

        // Tab-indented markdown renders as prose, not as a code block
        assert!(pages[0].content.contains(r#"<h1 id="aerogameframework">AeroGameFramework</h1>"#));
        assert!(pages[0].content.contains("<li>Everything is lazy-loaded</li>"));
        assert!(pages[1].content.contains(r#"data-src="lua/service_01.lua""#));
        assert!(pages[1].content.contains("<code>Init</code>"));
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.toml"), "").unwrap();
        assert!(init_site(dir.path()).is_err());
        assert!(!dir.path().join("site").exists());
    }
}
