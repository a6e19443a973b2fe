//! sitepress: a server-rendered company site and blog engine
//!
//! Local markdown posts are merged with content from a remote API,
//! ordered chronologically, and rendered into HTML pages on request.

pub mod commands;
pub mod config;
pub mod content;
pub mod pages;
pub mod remote;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// The main site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding one subdirectory per post
    pub posts_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Build the post repository for this site
    pub fn repository(&self) -> content::PostRepository {
        content::PostRepository::new(&self.posts_dir)
    }
}
