#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod logging;

use clap::Parser;
use locktree_core::lock::LOCKFILE_NAME;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "locktree")]
#[command(author, version, about = "Flatten a package-lock.json dependency tree", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List every package reachable from the project's dependencies
    List {
        /// Path to the lockfile
        #[arg(default_value = LOCKFILE_NAME)]
        path: PathBuf,

        /// Skip the root devDependencies
        #[arg(long)]
        no_dev: bool,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);

    let resolve = |path: PathBuf| match &cli.cwd {
        Some(cwd) => cwd.join(path),
        None => path,
    };

    match cli.command {
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::List { path, no_dev }) => {
            let action = commands::list::ListAction {
                path: resolve(path),
                include_dev: !no_dev,
            };
            let span = tracing::info_span!("list", cmd = "list", lockfile = %action.path.display());
            let _guard = span.enter();
            commands::list::run(&action, cli.json)
        }
        None => {
            let action = commands::list::ListAction {
                path: resolve(PathBuf::from(LOCKFILE_NAME)),
                include_dev: true,
            };
            commands::list::run(&action, cli.json)
        }
    }
}
