//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Directory
    pub posts_dir: String,

    // Writing
    pub new_post_name: String,
    pub default_layout: String,

    // Lint policy
    pub allowed_layouts: Vec<String>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            author: String::new(),
            url: "http://example.com".to_string(),

            posts_dir: "_posts".to_string(),

            new_post_name: ":year-:month-:day-:title.md".to_string(),
            default_layout: "post".to_string(),

            allowed_layouts: vec!["post".to_string(), "page".to_string()],

            extra: HashMap::new(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.default_layout, "post");
        assert_eq!(config.allowed_layouts, vec!["post", "page"]);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Example Blog
author: Test User
allowed_layouts:
  - post
  - note
posts_dir: content
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Example Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.allowed_layouts, vec!["post", "note"]);
        assert_eq!(config.posts_dir, "content");
        // Unspecified fields keep their defaults
        assert_eq!(config.default_layout, "post");
    }
}
