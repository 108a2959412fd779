//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Postlint;

/// Create a new post file from the configured naming pattern
pub fn create_post(app: &Postlint, title: &str, layout: &str, path: Option<&str>) -> Result<()> {
    let now = chrono::Local::now();

    fs::create_dir_all(&app.posts_dir)?;

    // Generate filename
    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        let post_name = &app.config.new_post_name;
        let slug = slug::slugify(title);

        post_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };

    let file_path = app.posts_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    if !app.config.allowed_layouts.iter().any(|l| l == layout) {
        tracing::warn!(
            "Layout {:?} is not in allowed_layouts; check will flag this post",
            layout
        );
    }

    let content = format!("---\nlayout: {}\ntitle: {}\nkeywords:\n---\n", layout, title);
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

/// Run the new command
pub fn run(app: &Postlint, title: &str, layout: Option<&str>) -> Result<()> {
    let layout = layout.unwrap_or(&app.config.default_layout);
    create_post(app, title, layout, None)
}
