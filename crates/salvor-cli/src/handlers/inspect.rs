use std::path::Path;

use anyhow::Result;
use is_terminal::IsTerminal;

use salvor_pipeline::telemetry::summarize;

use crate::context::ExecutionContext;
use crate::handlers::process::read_envelopes;
use crate::views;

pub fn handle(ctx: &ExecutionContext, file: &Path, line: usize) -> Result<()> {
    let envelopes = read_envelopes(file)?;
    if line == 0 || line > envelopes.len() {
        anyhow::bail!(
            "line {} is out of range; {} has {} envelopes",
            line,
            file.display(),
            envelopes.len()
        );
    }

    let raw = &envelopes[line - 1];
    let result = ctx.pipeline()?.process(raw);
    let summary = summarize(&result.debug, &result.recovery_attempts);

    let colored = std::io::stdout().is_terminal();
    views::print_inspection(raw, &result, &summary, colored);
    Ok(())
}
