//! CLI command definitions for appini.
//!
//! The structure follows clap's derive idiom: a `Cli` struct carrying the
//! global flags and one subcommand per inspection operation.

use crate::format::OutputFormat;
use clap::{Parser, Subcommand};

/// Layered per-target configuration resolver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Installation root (overrides APPINI_ROOT and discovery)
    #[arg(short, long, global = true)]
    pub root: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up one or more flat configuration keys
    Get {
        /// Keys to look up (the symfony. namespace may be omitted)
        #[arg(required = true)]
        keys: Vec<String>,

        /// Value to print when nothing resolved
        #[arg(short, long)]
        default: Option<String>,

        /// Shorten returned keys to the segment after the final dot
        #[arg(short, long)]
        shorten: bool,
    },

    /// Print a merged configuration section
    Section {
        /// Section name as it appears in the layer files
        name: String,
    },

    /// Print the resolved target id and its mode
    Target,

    /// List the layer files contributing to the merge
    Layers,

    /// Print the DSN of a named database
    Dsn {
        /// Database name (defaults to master)
        name: Option<String>,
    },

    /// Locate the per-target runtime.d/runtime.ini (interactive use only)
    RuntimeIni {
        /// Fall back through the mode-shared and shared directories
        #[arg(long)]
        use_defaults: bool,
    },

    /// Dump the whole resolved snapshot as JSON
    Dump,
}
