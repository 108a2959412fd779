//! List site content

use anyhow::Result;

use crate::content::loader::PostLoader;
use crate::Postlint;

/// List site content by type
pub async fn run(app: &Postlint, content_type: &str) -> Result<()> {
    let loader = PostLoader::new(app);
    let (posts, report) = loader.load_posts().await?;

    if report.has_errors() {
        tracing::warn!("{} while loading posts", report.summary());
    }

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "undated".to_string());
                println!("  {} - {} [{}]", date, post.title, post.source);
            }
        }
        "keyword" | "keywords" => {
            let mut keywords: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for keyword in post.keyword_list() {
                    *keywords.entry(keyword.to_string()).or_insert(0) += 1;
                }
            }
            println!("Keywords ({}):", keywords.len());
            let mut keywords: Vec<_> = keywords.into_iter().collect();
            keywords.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (keyword, count) in keywords {
                println!("  {} ({})", keyword, count);
            }
        }
        "layout" | "layouts" => {
            let mut layouts: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                *layouts.entry(post.layout.clone()).or_insert(0) += 1;
            }
            println!("Layouts ({}):", layouts.len());
            let mut layouts: Vec<_> = layouts.into_iter().collect();
            layouts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (layout, count) in layouts {
                println!("  {} ({})", layout, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, keyword, layout",
                content_type
            );
        }
    }

    Ok(())
}
