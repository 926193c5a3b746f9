//! # pack-cli
//!
//! Command-line front end for pack.
//!
//! This is the entry point of the `pack` binary. It parses the command line,
//! sets up logging and the panic hook, dispatches to the command handlers and
//! renders any error before exiting with a failure status.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use pack_config::SettingsOverrides;
use pack_core::error::PackResult;
use pack_core::types::VcsScheme;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Semantic versions, dependency constraints and version-control fetching
#[derive(Parser)]
#[command(name = "pack", version, about = "Semantic versions and dependency constraints")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace search path, overriding PACK_PATH
    #[arg(long, global = true, env = "PACK_PATH", value_name = "PATHS")]
    pub path: Option<String>,

    /// Packset to fetch into
    #[arg(long, global = true)]
    pub packset: Option<String>,

    /// Seconds a single version-control command may run
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a version and print its parts
    Semver {
        literal: String,
        #[arg(long)]
        json: bool,
    },
    /// Parse a dependency line and print its parts
    Parse {
        line: String,
        #[arg(long)]
        json: bool,
    },
    /// Check a version against constraints
    Satisfies {
        version: String,
        #[arg(required = true)]
        constraints: Vec<String>,
    },
    /// List the version tags of a repository
    Tags {
        dir: Option<Utf8PathBuf>,
        #[arg(long, value_parser = parse_scheme)]
        vcs: Option<VcsScheme>,
    },
    /// Fetch a dependency into the packset
    Fetch { line: String },
    /// Show the resolved workspace paths
    Paths,
    /// Validate a manifest
    Check { manifest: Option<Utf8PathBuf> },
    /// Add or replace a dependency in the manifest
    Add {
        line: String,
        #[arg(long)]
        manifest: Option<Utf8PathBuf>,
    },
    /// Remove a dependency from the manifest
    Remove {
        name: String,
        #[arg(long)]
        manifest: Option<Utf8PathBuf>,
    },
}

fn parse_scheme(value: &str) -> Result<VcsScheme, String> {
    VcsScheme::parse(value).ok_or_else(|| format!("'{value}' is not one of git, hg, bzr"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", ErrorFormatter::new().format_error(&err));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> PackResult<()> {
    let overrides = SettingsOverrides {
        packset: cli.packset,
        vcs_timeout: cli.timeout,
    };
    let ctx = CommandContext::new(cli.path, overrides)?;

    commands::dispatch_command(cli.command, &ctx)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pack={level},pack_config={level},pack_vcs={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("pack encountered an unexpected error: {}", panic_info);
        eprintln!("pack crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/pack-rs/pack/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
