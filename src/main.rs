//! CLI entry point for postlint

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postlint")]
#[command(version)]
#[command(about = "Front-matter parser and lint tool for Markdown blog posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new content repository
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Layout to use (defaults to the configured default_layout)
        #[arg(short, long)]
        layout: Option<String>,

        /// Title of the new post
        title: String,

        /// Filename for the new post (without extension)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Parse and lint all posts
    #[command(alias = "c")]
    Check {
        /// Report format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// List site content
    List {
        /// Type of content to list (post, keyword, layout)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postlint=debug,info"
    } else {
        "postlint=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing content repository in {:?}", target_dir);
            postlint::commands::init::init_site(&target_dir)?;
            println!("Initialized empty content repository in {:?}", target_dir);
        }

        Commands::New {
            layout,
            title,
            path,
        } => {
            let app = postlint::Postlint::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let layout = layout.as_deref().unwrap_or(&app.config.default_layout);
            postlint::commands::new::create_post(&app, &title, layout, path.as_deref())?;
        }

        Commands::Check { format, strict } => {
            let app = postlint::Postlint::new(&base_dir)?;
            let ok = postlint::commands::check::run(&app, &format, strict).await?;
            if !ok {
                std::process::exit(1);
            }
        }

        Commands::List { r#type } => {
            let app = postlint::Postlint::new(&base_dir)?;
            postlint::commands::list::run(&app, &r#type).await?;
        }

        Commands::Version => {
            println!("postlint version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
