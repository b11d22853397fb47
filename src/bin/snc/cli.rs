//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments
//! of the Sn compiler.

use clap::Parser;

/// Struct containing the CLI configuration for snc.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the Sn source file.
    #[arg(index = 1)]
    pub file: std::path::PathBuf,

    /// The path of the generated assembly file. Defaults to the source
    /// path with its extension replaced by `.o`.
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,

    /// Assemble with NASM, link with gcc and run the program after a
    /// successful compilation.
    #[arg(short = 'v', long = "run")]
    pub run: bool,

    /// Enable verbose internal logging.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Whether to dump the parsed AST (for debugging).
    #[arg(long)]
    pub dump_parsed: bool,

    /// Whether to dump the type-checked AST (for debugging).
    #[arg(long)]
    pub dump_typed: bool,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}
