// Fri Oct 16 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sqlrecover")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Recovers and classifies SQL statements from binaries and process memory", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// JSON config file; command-line flags win over it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_progress: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a binary image for SQL statements
    Extract(ExtractArgs),
    /// Scan the readable memory of a running process
    Memory(MemoryArgs),
    /// Classify the statements of an extraction report
    Review(ReviewArgs),
    /// Correlate exported valid statements with the UI field map
    Map(MapArgs),
    /// Extract, review and map in one pass
    Run(RunArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    #[arg(short, long)]
    pub binary: Option<PathBuf>,

    #[arg(short, long, default_value = "extracted_sql_queries.txt")]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct MemoryArgs {
    /// Process name, matched case-insensitively against the name and argv[0]
    #[arg(short, long, conflicts_with = "pid")]
    pub process: Option<String>,

    #[arg(long)]
    pub pid: Option<i32>,

    #[arg(short, long, default_value = "memory_sql_queries.txt")]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ReviewArgs {
    #[arg(short, long, default_value = "extracted_sql_queries.txt")]
    pub input: PathBuf,

    #[arg(short, long, default_value = "sql_query_review_report.txt")]
    pub report: PathBuf,

    #[arg(long, default_value = "valid_sql_queries.txt")]
    pub valid_output: PathBuf,

    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct MapArgs {
    #[arg(short, long, default_value = "valid_sql_queries.txt")]
    pub input: PathBuf,

    #[arg(long)]
    pub ui_map: Option<PathBuf>,

    #[arg(short, long, default_value = "ui_sql_mapping_report.md")]
    pub output: PathBuf,

    #[arg(long, default_value = "ui_sql_detailed_mapping.txt")]
    pub detail: PathBuf,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[arg(short, long)]
    pub binary: Option<PathBuf>,

    #[arg(long)]
    pub ui_map: Option<PathBuf>,

    /// Directory for every artifact of the run
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub json: bool,
}
