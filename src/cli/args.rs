//! Defines the command-line arguments and subcommands for the `pb` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::discovery::DEFAULT_EXTENSION;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "pb",
    version,
    about = "Parse and inspect Protocol Buffers schema files."
)]
pub struct PbArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the syntax tree of a schema file.
    Ast {
        #[arg(required = true)]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = AstFormat::Json)]
        format: AstFormat,
    },
    /// Parse files and directories and report which ones fail.
    Check {
        /// Files, or directories to search recursively.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Extension of the files picked up inside directories.
        #[arg(long, default_value = DEFAULT_EXTENSION)]
        extension: String,
    },
    /// List the leading comments attached to every statement.
    Comments {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Print the zig-zag encoding of 32-bit integers.
    Zigzag {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AstFormat {
    Json,
    Debug,
}
