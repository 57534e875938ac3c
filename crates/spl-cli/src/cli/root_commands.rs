use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve industry sponsors from a pipe-delimited trial registry dump
    Resolve(ResolveArgs),
    /// Extract products from an OpenFDA drugsfda dump and resolve their sponsors
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Sponsors file with nct_id|name|agency_class columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Diagnostic CSV listing queries that ended unresolved
    #[arg(long)]
    pub unresolved_output: Option<PathBuf>,

    /// Cap on the number of records resolved
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Case-insensitive substring filter on the raw sponsor name
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Override resolver.concurrency for this run
    #[arg(short, long)]
    pub concurrency: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// OpenFDA drugsfda JSON dump
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path (one row per product)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Diagnostic CSV listing sponsors that ended unresolved
    #[arg(long)]
    pub unresolved_output: Option<PathBuf>,

    /// Cap on the number of unique sponsors resolved
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Case-insensitive substring filter on the sponsor name
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Override resolver.concurrency for this run
    #[arg(short, long)]
    pub concurrency: Option<usize>,
}
