//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Content
    /// Directory with one subdirectory per post, relative to the base dir
    pub posts_dir: String,
    /// Optional snapshot of remotely-published posts, injected at deploy time
    pub remote_posts: Option<String>,
    pub per_page: usize,

    // Remote content API
    pub api: ApiConfig,

    // Fallbacks for absent remote fields
    pub defaults: DefaultsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Company Site".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            posts_dir: "_blog".to_string(),
            remote_posts: None,
            per_page: 10,

            api: ApiConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Remote content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the content service
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.example.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Documented defaults substituted for absent remote fields.
///
/// Remote records arrive with every field optional; rendering never sees a
/// missing value, it sees one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub title: String,
    pub published: String,
    pub author_key: String,
    pub category_key: String,
    pub avatar: String,
    pub banner: String,
    pub company: String,
    pub about: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            title: "Default Title".to_string(),
            published: "2022-02-08".to_string(),
            author_key: "0".to_string(),
            category_key: "0".to_string(),
            avatar: "/image/avatar.png".to_string(),
            banner: "/image/banner.webp".to_string(),
            company: "Default Company".to_string(),
            about: "No Information".to_string(),
        }
    }
}
