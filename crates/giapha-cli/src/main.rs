//! Gia Pha CLI - Command-line interface for Gia Pha
//!
//! Loads a family snapshot and answers kinship, lineage and consistency
//! questions about it.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::Context;
use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "giapha")]
#[command(author = "Gia Pha Contributors")]
#[command(version)]
#[command(about = "Vietnamese family tree kinship engine", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Snapshot file (defaults to the configured snapshot)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Gia Pha in the current directory
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show what two people call each other
    Kinship {
        /// First person: ID or name
        a: String,

        /// Second person: ID or name
        b: String,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Kinship terms for every pair among the given people
    Matrix {
        /// People to include (defaults to everyone)
        people: Vec<String>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Recalculate generations and birth orders
    Lineage {
        /// Only show records whose values would change
        #[arg(long)]
        changed_only: bool,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List snapshot consistency issues
    Check,

    /// Search people by name
    Find {
        /// Name or fragment, diacritics optional
        query: String,
    },

    /// Show snapshot statistics
    Status,
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { path } = &cli.command {
        return commands::init(path);
    }

    let config = Config::discover(&std::env::current_dir()?)?;
    if !config.color {
        colored::control::set_override(false);
    }
    let ctx = Context {
        config,
        snapshot: cli.snapshot,
    };

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Kinship { a, b, json } => commands::kinship(&ctx, &a, &b, json),
        Commands::Matrix { people, json } => commands::matrix(&ctx, &people, json),
        Commands::Lineage { changed_only, json } => commands::lineage(&ctx, changed_only, json),
        Commands::Check => commands::check(&ctx),
        Commands::Find { query } => commands::find(&ctx, &query),
        Commands::Status => commands::status(&ctx),
    }
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_snapshot_flag() {
        let cli = Cli::parse_from(["giapha", "kinship", "a", "b", "--snapshot", "f.json"]);
        assert_eq!(cli.snapshot, Some(PathBuf::from("f.json")));
        assert!(matches!(cli.command, Commands::Kinship { json: false, .. }));

        let cli = Cli::parse_from(["giapha", "lineage", "--changed-only", "--json"]);
        assert!(matches!(
            cli.command,
            Commands::Lineage {
                changed_only: true,
                json: true
            }
        ));
    }
}
