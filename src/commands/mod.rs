//! CLI commands

pub mod build;
pub mod clean;
pub mod info;
pub mod init;
