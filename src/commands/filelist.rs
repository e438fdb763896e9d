//! Write the framework file list

use anyhow::Result;

use crate::filelist::FileList;
use crate::Site;

/// Build `filelist.json` and `filelist.min.json` in the site root
pub fn run(site: &Site) -> Result<()> {
    let config = &site.config.filelist;
    let source = site.base_dir.join(&config.source);

    tracing::info!("Building file list from {:?}", source);
    let list = FileList::build(&source, config)?;
    list.write(&site.base_dir, config)?;
    tracing::info!(
        "File list built: {} files -> {}, {}",
        list.paths.file_count(),
        config.output,
        config.output_min
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_filelist_command() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("framework/Shared")).unwrap();
        fs::write(dir.path().join("framework/Shared/Event.lua"), "return {}").unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "filelist:\n  source: framework\n  fetch_prefix: https://example.com/raw/\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();

        let json = fs::read_to_string(dir.path().join("filelist.json")).unwrap();
        assert!(json.contains("\"url\": \"https://example.com/raw/\""));
        assert!(json.contains("\"name\": \"framework\""));
        assert!(json.contains("\"name\": \"Event.lua\""));
        assert!(dir.path().join("filelist.min.json").exists());
    }
}
