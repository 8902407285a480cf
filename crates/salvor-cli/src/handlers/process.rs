use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use serde_json::{Value, json};

use salvor_types::{ProcessedResult, RawToolResult};

use crate::context::ExecutionContext;
use crate::views;

pub fn handle(ctx: &ExecutionContext, file: &Path, json_output: bool, stats: bool) -> Result<()> {
    let envelopes = read_envelopes(file)?;
    let pipeline = ctx.pipeline()?;
    let store = ctx.store();

    let mut results: Vec<ProcessedResult> = Vec::with_capacity(envelopes.len());
    for raw in &envelopes {
        let result = pipeline.process(raw);
        store.insert(result.clone());
        results.push(result);
    }

    if json_output {
        let doc = json!({
            "results": results,
            "stats": store.stats(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let colored = std::io::stdout().is_terminal();
    views::print_batch_header(file, results.len());
    for (index, result) in results.iter().enumerate() {
        views::print_result(index + 1, result, colored);
    }
    if stats {
        views::print_stats(&store.stats());
    }

    Ok(())
}

/// Read raw envelopes from a JSONL file, one per non-empty line.
///
/// A line that is not a JSON envelope is fed through verbatim as opaque
/// content; judging broken input is the pipeline's job, not the reader's.
pub fn read_envelopes(path: &Path) -> Result<Vec<RawToolResult>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let envelopes = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match serde_json::from_str::<Value>(line) {
            Ok(value) if value.is_object() => RawToolResult::from_value(&value),
            _ => RawToolResult::new("unknown", line),
        })
        .collect();
    Ok(envelopes)
}
