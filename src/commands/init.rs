//! Initialize a new content repository

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a content repository in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("_posts"))?;

    // Create default _config.yml
    let config_content = r#"# postlint configuration

# Site
title: My Blog
author: ''
url: http://example.com

# Directory
posts_dir: _posts

# Writing
new_post_name: :year-:month-:day-:title.md
default_layout: post

# Lint policy
allowed_layouts:
  - post
  - page
"#;
    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, config_content)?;
    }

    // First post, named so the date/slug convention applies
    let now = chrono::Local::now();
    let post_path = target_dir
        .join("_posts")
        .join(format!("{}-hello-world.md", now.format("%Y-%m-%d")));
    if !post_path.exists() {
        let post_content = "---\nlayout: post\ntitle: Hello World\nkeywords: hello\n---\n\
                            Welcome! This post was created by `postlint init`.\n";
        fs::write(&post_path, post_content)?;
    }

    Ok(())
}
