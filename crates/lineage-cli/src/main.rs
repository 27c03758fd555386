//! Lineage CLI - Command-line interface for Lineage
//!
//! Reads an analysis dump produced by the resolver and writes the
//! descendants report for the requested parent classes and modules.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod input;

#[derive(Parser)]
#[command(name = "lineage")]
#[command(author = "Lineage Contributors")]
#[command(version)]
#[command(about = "Descendant reports for class and module hierarchies", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Lineage in the current directory
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Write the descendants of the given parents
    Report {
        /// Analysis dump (symbols and parsed files) as JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Config file (defaults to .lineage/config.json if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix stripped from file paths in the report
        #[arg(long)]
        strip_prefix: Option<String>,

        /// Fully qualified parent names, e.g. Opus::SafeMachine
        #[arg(required = true)]
        parents: Vec<String>,
    },
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

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Report {
            input,
            config,
            output,
            strip_prefix,
            parents,
        } => commands::report(commands::ReportOptions {
            input: &input,
            config: config.as_deref(),
            output: output.as_deref(),
            strip_prefix: strip_prefix.as_deref(),
            parents: &parents,
        }),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
