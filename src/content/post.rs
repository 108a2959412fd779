//! Post record model

use chrono::NaiveDate;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use super::FrontMatter;
use crate::config::SiteConfig;

lazy_static! {
    /// Filename convention: `<YYYY>-<MM>-<DD>-<slug>.md`
    static ref DATED_STEM: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.+)$").unwrap();
}

/// Advisory findings from the lint pass over a parsed post.
///
/// These never block ingestion; they are collected per post and surfaced
/// as warnings in the batch report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `title` is empty after trimming whitespace.
    #[error("title is empty")]
    EmptyTitle,

    /// `layout` is not in the configured allow-list.
    #[error("unknown layout: {layout}")]
    UnknownLayout { layout: String },

    /// A fenced code block in the body is never closed.
    #[error("code fence opened at body line {line} is never closed")]
    UnclosedCodeFence { line: usize },
}

impl ValidationError {
    /// Stable identifier for report consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle => "EmptyTitle",
            ValidationError::UnknownLayout { .. } => "UnknownLayout",
            ValidationError::UnclosedCodeFence { .. } => "UnclosedCodeFence",
        }
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Layout template the renderer should apply
    pub layout: String,

    /// Free-text keywords, comma/space separated
    pub keywords: Option<String>,

    /// Publication date, derived from the filename convention
    pub date: Option<NaiveDate>,

    /// Slug (URL-friendly name), derived from the filename
    pub slug: String,

    /// Document body, passed through unmodified
    pub body: String,

    /// Source file path (relative to the posts directory)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Post {
    /// Build a post record from parsed front matter and the file it came
    /// from. Date and slug come from the filename, not the document.
    pub fn from_parts(fm: FrontMatter, body: &str, source: String, full_source: PathBuf) -> Self {
        let stem = full_source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        let (date, slug) = split_dated_stem(stem);

        Self {
            title: fm.title,
            layout: fm.layout,
            keywords: fm.keywords,
            date,
            slug,
            body: body.to_string(),
            source,
            full_source,
            extra: fm.extra,
        }
    }

    /// Split the free-text `keywords` field into individual tags
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .as_deref()
            .map(|k| {
                k.split([',', ' '])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Advisory lint pass. Returns every finding instead of stopping at
    /// the first one; an empty vector means the post is clean.
    pub fn validate(&self, config: &SiteConfig) -> Vec<ValidationError> {
        let mut findings = Vec::new();

        if self.title.trim().is_empty() {
            findings.push(ValidationError::EmptyTitle);
        }

        if !config.allowed_layouts.iter().any(|l| l == &self.layout) {
            findings.push(ValidationError::UnknownLayout {
                layout: self.layout.clone(),
            });
        }

        if let Some(line) = find_unclosed_fence(&self.body) {
            findings.push(ValidationError::UnclosedCodeFence { line });
        }

        findings
    }
}

/// Derive (date, slug) from a file stem following the naming convention.
/// The convention is not enforced: a stem without a valid date prefix
/// yields no date and the whole stem as slug.
fn split_dated_stem(stem: &str) -> (Option<NaiveDate>, String) {
    if let Some(caps) = DATED_STEM.captures(stem) {
        let date = caps[1].parse().ok().and_then(|y| {
            let m = caps[2].parse().ok()?;
            let d = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(y, m, d)
        });
        if date.is_some() {
            return (date, caps[4].to_string());
        }
    }
    (None, stem.to_string())
}

/// Scan body lines for an opened fenced code block that never closes.
/// Returns the 1-based line of the dangling opener.
fn find_unclosed_fence(body: &str) -> Option<usize> {
    // (fence char, run length, opening line)
    let mut open: Option<(char, usize, usize)> = None;

    for (idx, line) in body.lines().enumerate() {
        let trimmed = line.trim_start();
        // More than three leading spaces makes an indented code line
        if line.len() - trimmed.len() > 3 {
            continue;
        }
        let first = match trimmed.chars().next() {
            Some(c) if c == '`' || c == '~' => c,
            _ => continue,
        };
        let run = trimmed.chars().take_while(|&c| c == first).count();
        if run < 3 {
            continue;
        }

        match open {
            None => open = Some((first, run, idx + 1)),
            Some((ch, len, _)) => {
                // A closer matches the opener's char, is at least as long,
                // and carries no info string
                if first == ch && run >= len && trimmed[run..].trim().is_empty() {
                    open = None;
                }
            }
        }
    }

    open.map(|(_, _, line)| line)
}
