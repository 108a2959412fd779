//! Post loader - ingests every document under the posts directory
//!
//! Each file is parsed independently, one blocking task per file; a
//! document that fails to parse is reported and skipped without touching
//! the rest of the batch.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use super::{FrontMatter, ParseError, Post};
use crate::report::Report;
use crate::Postlint;

/// Why a single document could not be ingested
#[derive(Debug, Error)]
enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    fn kind(&self) -> &'static str {
        match self {
            LoadError::Parse(e) => e.kind(),
            LoadError::Io(_) => "Io",
        }
    }
}

/// Loads posts for an application instance
pub struct PostLoader<'a> {
    app: &'a Postlint,
}

impl<'a> PostLoader<'a> {
    pub fn new(app: &'a Postlint) -> Self {
        Self { app }
    }

    /// Load all posts, collecting per-file parse failures into the report.
    /// Results are re-sorted (date descending, then slug) so concurrent
    /// completion order never shows through.
    pub async fn load_posts(&self) -> Result<(Vec<Post>, Report)> {
        let mut report = Report::new();
        if !self.app.posts_dir.exists() {
            return Ok((Vec::new(), report));
        }

        let mut set = JoinSet::new();
        for path in self.post_files() {
            let posts_dir = self.app.posts_dir.clone();
            set.spawn_blocking(move || {
                let outcome = load_post(&path, &posts_dir);
                (path, outcome)
            });
        }

        let mut posts = Vec::new();
        while let Some(joined) = set.join_next().await {
            let (path, outcome) = joined?;
            match outcome {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    report.error(
                        source_name(&path, &self.app.posts_dir),
                        e.kind(),
                        e.to_string(),
                    );
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        report.sort();

        Ok((posts, report))
    }

    /// Run the advisory lint pass over loaded posts, appending warnings
    /// to the report. Each post is validated independently.
    pub fn validate_posts(&self, posts: &[Post], report: &mut Report) {
        for post in posts {
            for finding in post.validate(&self.app.config) {
                report.warning(post.source.clone(), finding.kind(), finding.to_string());
            }
        }
        report.sort();
    }

    /// Candidate markdown files, sorted for determinism
    fn post_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.app.posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }
}

/// Parse one file into a post record
fn load_post(path: &Path, posts_dir: &Path) -> Result<Post, LoadError> {
    let raw = fs::read_to_string(path)?;
    let (fm, body) = FrontMatter::parse(&raw)?;
    let source = source_name(path, posts_dir);
    Ok(Post::from_parts(fm, body, source, path.to_path_buf()))
}

/// Source path relative to the posts directory
fn source_name(path: &Path, posts_dir: &Path) -> String {
    path.strip_prefix(posts_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
