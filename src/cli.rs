use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doc-search-index")]
#[command(about = "Build and inspect static documentation search indexes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the search index from a documentation source tree
    Build {
        /// Directory holding docs.toml
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Output file (overrides `output` in docs.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output layout (default: from the output extension)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Rebuild even when sources are unchanged
        #[arg(short, long)]
        force: bool,
    },
    /// Parse an index file and report counts and warnings
    Check { file: PathBuf },
    /// Print one line per record
    List {
        file: PathBuf,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        page: Option<String>,
    },
    /// Convert between the JavaScript and JSON layouts
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
        /// Variable for JavaScript output (default: the input's own)
        #[arg(long)]
        variable: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Js,
    Json,
}
