use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salvor")]
#[command(about = "Process raw AI tool results into display-ready views", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Pipeline configuration file (TOML). Built-in defaults apply when the
    /// file is absent.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the pipeline over a JSONL file of raw envelopes")]
    Process {
        /// Input file, one raw envelope per line
        file: PathBuf,

        /// Emit one machine-readable JSON document instead of text
        #[arg(long)]
        json: bool,

        /// Print registry statistics after the batch
        #[arg(long)]
        stats: bool,
    },

    #[command(about = "Show the full processing trail for one envelope")]
    Inspect {
        /// Input file, one raw envelope per line
        file: PathBuf,

        /// 1-based line number to inspect
        #[arg(long, default_value = "1")]
        line: usize,
    },
}
