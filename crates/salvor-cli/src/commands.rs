use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::context::ExecutionContext;
use crate::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let ctx = ExecutionContext::new(cli.config);

    match cli.command {
        Commands::Process { file, json, stats } => {
            handlers::process::handle(&ctx, &file, json, stats)
        }
        Commands::Inspect { file, line } => handlers::inspect::handle(&ctx, &file, line),
    }
}
