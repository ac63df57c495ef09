//! CLI entry point for reweb

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reweb::{BuildError, Reweb};

#[derive(Parser)]
#[command(name = "reweb")]
#[command(version)]
#[command(about = "Build a static site from Markdown, HTML and data-driven pages", long_about = None)]
struct Cli {
    /// Set the project directory (defaults to current directory)
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
    /// Create a new project skeleton
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Build every page into dist/
    #[command(alias = "b")]
    Build,

    /// Remove the dist/ folder
    Clean,

    /// Show site name, version and source counts
    Info,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "reweb=debug,info"
    } else {
        "reweb=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err
                .downcast_ref::<BuildError>()
                .map(BuildError::kind)
                .unwrap_or("Error");
            eprintln!("{kind}: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing project in {:?}", target_dir);
            reweb::commands::init::init_site(&target_dir)?;
            println!("Initialized empty project in {:?}", target_dir);
        }

        Commands::Build => {
            let reweb = Reweb::new(&base_dir)?;
            let report = reweb.build()?;
            println!("Built version {} successfully!", report.version);
        }

        Commands::Clean => {
            let reweb = Reweb::new(&base_dir)?;
            reweb.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Info => {
            let reweb = Reweb::new(&base_dir)?;
            reweb::commands::info::run(&reweb)?;
        }
    }

    Ok(())
}
