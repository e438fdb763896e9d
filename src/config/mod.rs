//! Configuration module

mod site;

pub use site::FileListConfig;
pub use site::HighlightConfig;
pub use site::MarkdownConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILES;
