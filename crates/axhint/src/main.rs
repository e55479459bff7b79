//! Binary entrypoint for `axhint`.
use std::{
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use config::resolve_config_path;
use tokio::runtime::Builder;
use tracing::debug;

mod error;
/// Discovery and selection over captured desktops.
mod hints;
/// Scripted runs of the activation listeners.
mod keys;

use crate::error::{Result, print_hints};

#[derive(Parser, Debug)]
#[command(name = "axhint", about = "Keyboard hint navigation over accessibility trees", version)]
/// Command-line interface for the `axhint` binary.
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,

    /// Optional path to the config file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate the configuration then exit.
    Check {
        /// Path to configuration file to check (defaults to ~/.axhint/config.ron)
        path: Option<PathBuf>,

        /// Dump the effective configuration as JSON to stdout
        #[arg(long)]
        dump: bool,
    },
    /// Discover and label hintable elements in a captured desktop.
    Hints {
        /// Desktop snapshot (RON, or JSON with a .json extension)
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Comma-separated sources to query (defaults to the configured sources)
        #[arg(long, value_delimiter = ',')]
        sources: Vec<String>,

        /// Characters to type into a hint session after listing
        #[arg(long = "type", value_name = "TEXT")]
        typed: Option<String>,
    },
    /// Run a scripted key stream through the activation listeners.
    Keys {
        /// RON list of steps, e.g. [Tap("f"), Wait(40), Tap("d")]
        #[arg(long, value_name = "FILE")]
        script: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log);
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        print_hints(&e);
        process::exit(1);
    }
}

/// Dispatch the selected subcommand.
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check { path, dump } => check(path.as_deref().or(cli.config.as_deref()), dump),
        Command::Hints {
            snapshot,
            sources,
            typed,
        } => {
            let cfg = config::load(cli.config.as_deref())?;
            let sources = hints::parse_sources(&sources, &cfg)?;
            let rt = Builder::new_multi_thread().enable_all().build()?;
            let aggregator = hints::open(&cfg, &snapshot)?;
            let found = rt.block_on(hints::discover(&aggregator, &sources))?;
            debug!(count = found.len(), "hints_found");
            print!("{}", hints::render(&found));
            if let Some(text) = typed {
                for line in hints::select(&aggregator, found, &text) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        Command::Keys { script } => {
            let cfg = config::load(cli.config.as_deref())?;
            let steps = keys::load_script(&script)?;
            let rt = Builder::new_current_thread()
                .enable_time()
                .start_paused(true)
                .build()?;
            let transcript = rt.block_on(keys::run_script(&cfg, &steps))?;
            print!("{transcript}");
            Ok(())
        }
    }
}

/// Validate the config at `explicit` (or the default location).
fn check(explicit: Option<&Path>, dump: bool) -> Result<()> {
    let resolved = resolve_config_path(explicit);
    let cfg = config::load(resolved.as_deref())?;
    if dump {
        match serde_json::to_string_pretty(&cfg) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize config: {e}");
                process::exit(1);
            }
        }
    } else {
        match resolved {
            Some(p) => println!("OK: {}", p.display()),
            None => println!("OK: no config file, using defaults"),
        }
    }
    Ok(())
}
