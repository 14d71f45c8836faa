//! CLI parse: clap types for tree-json. No behavior; definitions only.

use crate::config::CollisionPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Roll a directory tree up into a single JSON document
#[derive(Parser, Debug)]
#[command(name = "tree-json")]
#[command(about = "Roll a directory tree up into a single nested JSON document")]
pub struct Cli {
    /// Source directory to convert
    pub source: PathBuf,

    /// Destination directory; the document is written as <SOURCE name>.json
    pub dest: PathBuf,

    /// Configuration file path (overrides ./tree-json.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Indent the written JSON
    #[arg(long)]
    pub pretty: bool,

    /// Maximum simultaneous filesystem operations (default: unbounded)
    #[arg(long)]
    pub max_in_flight: Option<usize>,

    /// Sibling key collision handling (overwrite, reject)
    #[arg(long)]
    pub on_collision: Option<CollisionPolicy>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
