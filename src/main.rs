//! CLI entry point for galleria

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "galleria")]
#[command(version)]
#[command(about = "Static image galleries with a keyboard-driven lightbox", long_about = None)]
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
    /// Initialize a new gallery site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new gallery manifest
    New {
        /// Title of the new gallery
        title: String,

        /// File name (without extension) inside the galleries directory
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List galleries and their image counts
    List,

    /// Replay viewer events against a gallery
    Replay {
        /// Gallery slug
        gallery: String,

        /// Events: open:<i>, next, prev, close, backdrop, image, key:<Name>
        #[arg(required = true)]
        events: Vec<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "galleria=debug,info"
    } else {
        "galleria=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing gallery site in {:?}", target_dir);
            galleria::commands::init::init_site(&target_dir)?;
            println!("Initialized gallery site in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let site = galleria::Galleria::new(&base_dir)?;
            tracing::info!("Creating new gallery: {}", title);
            galleria::commands::new::create_gallery(&site, &title, path.as_deref())?;
        }

        Commands::Generate => {
            let site = galleria::Galleria::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = galleria::Galleria::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            galleria::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = galleria::Galleria::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let site = galleria::Galleria::new(&base_dir)?;
            galleria::commands::list::run(&site)?;
        }

        Commands::Replay { gallery, events } => {
            let site = galleria::Galleria::new(&base_dir)?;
            galleria::commands::replay::run(&site, &gallery, &events)?;
        }

        Commands::Version => {
            println!("galleria version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
