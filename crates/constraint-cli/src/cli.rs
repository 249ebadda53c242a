//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::props::parse_prop;

#[derive(Parser)]
#[command(name = "fabric-constraint")]
#[command(about = "Compile and evaluate placement constraint expressions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log compilation and cache activity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Trace every node as it is evaluated
    #[arg(long, global = true)]
    pub trace: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile an expression and show its canonical form
    Parse {
        /// Constraint text
        #[arg(short, long)]
        expr: String,
    },
    /// Evaluate an expression against a set of properties
    Check {
        /// Constraint text
        #[arg(short, long)]
        expr: String,
        /// Evaluate for the primary replica
        #[arg(long)]
        primary: bool,
        #[command(flatten)]
        props: PropArgs,
    },
    /// Evaluate expressions interactively
    Repl {
        /// Start in primary mode
        #[arg(long)]
        primary: bool,
        #[command(flatten)]
        props: PropArgs,
    },
}

/// Where node properties come from.
#[derive(Args, Debug, Default, Clone)]
pub struct PropArgs {
    /// Property as NAME=VALUE (repeatable, overrides the file)
    #[arg(short, long = "prop", value_name = "NAME=VALUE", value_parser = parse_prop)]
    pub props: Vec<(String, String)>,

    /// JSON object of string properties
    #[arg(long, value_name = "PATH")]
    pub props_file: Option<PathBuf>,
}
