//! sitecheck CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sitecheck::{
    commands::{
        cmd_add, cmd_check, cmd_init, cmd_list, cmd_show, print_add_outcome,
        print_check_outcome, print_url_details, print_urls,
    },
    config::Config,
    db::Database,
    error::{Error, Result},
};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sitecheck")]
#[command(version, about = "Track websites and record SEO checks", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "SITECHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the configuration file and create the database
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Start tracking a site (stored as scheme://host)
    Add {
        /// URL to track
        url: String,
    },

    /// List tracked sites with their latest check
    List,

    /// Show a tracked site and its check history
    Show {
        /// Site ID (use 'sitecheck list' to find it)
        id: i64,
    },

    /// Fetch a tracked site once and record status, h1, title and description
    Check {
        /// Site ID (use 'sitecheck list' to find it)
        id: i64,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        // Rejected input is a usage problem, not a runtime failure
        let code = match e {
            Error::Validation(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_config_path);

    match cli.command {
        Commands::Init { force } => {
            let config = cmd_init(&config_path, force).await?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "config": config.paths.config_file.display().to_string(),
                        "database": config.paths.db_file.display().to_string(),
                    })
                );
            } else {
                println!("✓ sitecheck initialized successfully");
                println!("  Config: {}", config.paths.config_file.display());
                println!("  Database: {}", config.paths.db_file.display());
                println!("\nNext steps:");
                println!("  1. Track a site: sitecheck add https://example.com");
                println!("  2. Check it: sitecheck check <id>");
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sitecheck", &mut std::io::stdout());
        }

        Commands::Add { url } => {
            let (_, db) = open(&config_path).await?;
            let outcome = cmd_add(&db, &url).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_add_outcome(&outcome);
            }
        }

        Commands::List => {
            let (_, db) = open(&config_path).await?;
            let urls = cmd_list(&db).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&urls)?);
            } else {
                print_urls(&urls);
            }
        }

        Commands::Show { id } => {
            let (_, db) = open(&config_path).await?;
            let details = cmd_show(&db, id).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                print_url_details(&details);
            }
        }

        Commands::Check { id } => {
            let (config, db) = open(&config_path).await?;
            let outcome = cmd_check(&config, &db, id).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_check_outcome(&outcome);
            }
        }
    }

    Ok(())
}

/// Load configuration and connect to the database it points at
async fn open(config_path: &Path) -> Result<(Config, Database)> {
    let config = Config::load(config_path)?;
    let db = Database::connect(&config.paths.db_file).await?;
    Ok((config, db))
}
