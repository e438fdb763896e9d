//! List site content

use anyhow::Result;
use walkdir::WalkDir;

use crate::content::loader::ContentLoader;
use crate::helpers::route_url;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    for line in collect(site, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Lines printed by [`run`]
fn collect(site: &Site, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "page" | "pages" => {
            let pages = ContentLoader::new(site).load_pages()?;
            lines.push(format!("Pages ({}):", pages.len()));
            for page in pages {
                let order = page
                    .nav_order
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "-".to_string());
                lines.push(format!("  [{}] {} [{}]", order, page.title, page.source));
            }
        }
        "route" | "routes" => {
            let pages = ContentLoader::new(site).load_pages()?;
            lines.push(format!("Routes ({}):", pages.len()));
            for page in pages {
                lines.push(format!(
                    "  {} -> {}",
                    route_url(&site.config, &page.route),
                    page.output_path().display()
                ));
            }
        }
        "asset" | "assets" => {
            let mut assets = Vec::new();
            if site.source_dir.exists() {
                for entry in WalkDir::new(&site.source_dir)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    let path = entry.path();
                    if !entry.file_type().is_file() || path.starts_with(&site.pages_dir) {
                        continue;
                    }
                    if let Ok(relative) = path.strip_prefix(&site.source_dir) {
                        assets.push(relative.to_string_lossy().replace('\\', "/"));
                    }
                }
            }
            lines.push(format!("Assets ({}):", assets.len()));
            lines.extend(assets.into_iter().map(|a| format!("  {}", a)));
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: page, route, asset",
                content_type
            );
        }
    }

    Ok(lines)
}
