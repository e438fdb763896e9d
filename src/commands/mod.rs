//! CLI subcommands

pub mod build;
pub mod clean;
pub mod filelist;
pub mod init;
pub mod list;
