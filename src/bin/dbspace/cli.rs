use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for the dbspace analyzer.
#[derive(Parser, Debug)]
#[command(name = "dbspace", version, about = "SQLite space-usage analyzer (dbstat based, read-only)")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Whole-file summary: pages in use / free / pointer-map, payload share
    ///
    /// Example:
    ///   dbspace overview --path ./app.db
    ///   dbspace overview --path ./app.db --json
    Overview {
        #[arg(long)]
        path: PathBuf,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Pages per owning table, largest first (bar-chart rows)
    Tables {
        #[arg(long)]
        path: PathBuf,
        /// One row per schema object instead of folding indexes into their table
        #[arg(long, default_value_t = false)]
        separate: bool,
        /// JSON output (array)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Derived space report for the whole file or a single object
    Report {
        #[arg(long)]
        path: PathBuf,
        /// Restrict the report to one table or index
        #[arg(long)]
        name: Option<String>,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
