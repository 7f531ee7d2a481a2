//! Command-line arguments and subcommands, via `clap`'s derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "braq",
    version,
    about = "A small embeddable expression language with pipelines and curried functions."
)]
pub struct BraqArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a script and display its result.
    Run {
        /// The script file to run.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Show the expression tree for a script.
    Ast {
        /// The script file to read.
        #[arg(required = true)]
        file: PathBuf,
        /// Emit the tree as JSON instead of the canonical printed form.
        #[arg(long)]
        json: bool,
    },
    /// Show the token stream for a script.
    Tokens {
        /// The script file to scan.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Strictly validate bracket balance and string termination.
    Check {
        /// The script file to check.
        #[arg(required = true)]
        file: PathBuf,
    },
}
