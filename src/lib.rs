//! postlint: front-matter parsing and linting for Markdown blog posts
//!
//! This crate implements the ingestion side of a static blog: it parses
//! Jekyll-style documents (YAML front matter followed by an opaque
//! Markdown body) into structured post records, lints them against a
//! configured policy, and reports per-file diagnostics. Rendering the
//! body to HTML is left to a downstream site generator.

pub mod commands;
pub mod config;
pub mod content;
pub mod report;

use anyhow::Result;
use std::path::Path;

/// The main application: configuration plus resolved directories
#[derive(Clone)]
pub struct Postlint {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts directory
    pub posts_dir: std::path::PathBuf,
}

impl Postlint {
    /// Create a new application instance from a directory.
    /// Configuration is read once here and passed by reference from then
    /// on; there is no process-wide state.
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

    /// Parse and lint every post, returning the records and the batch
    /// report. One bad document never aborts the rest.
    pub async fn check(&self) -> Result<(Vec<content::Post>, report::Report)> {
        let loader = content::loader::PostLoader::new(self);
        let (posts, mut report) = loader.load_posts().await?;
        loader.validate_posts(&posts, &mut report);
        Ok((posts, report))
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, layout: Option<&str>) -> Result<()> {
        commands::new::run(self, title, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_check_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("2024-05-01-strings-catalogs.md"),
            "---\nlayout: post\ntitle: Strings Catalogs\nkeywords: swift, localization\n---\nBody text.\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("2024-05-02-broken.md"),
            "not front matter at all\n",
        )
        .unwrap();

        let app = Postlint::new(tmp.path()).unwrap();
        let (posts, report) = app.check().await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "strings-catalogs");
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 0);
    }

    #[tokio::test]
    async fn test_config_allow_list_drives_lint() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("_config.yml"),
            "allowed_layouts:\n  - article\n",
        )
        .unwrap();
        let posts_dir = tmp.path().join("_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("2024-05-01-a.md"),
            "---\nlayout: post\ntitle: A\n---\n",
        )
        .unwrap();

        let app = Postlint::new(tmp.path()).unwrap();
        let (_, report) = app.check().await.unwrap();

        assert!(!report.has_errors());
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.diagnostics[0].kind, "UnknownLayout");
    }
}
