//! Plain-text rendering of processing results and debug trails.

use std::path::Path;

use owo_colors::OwoColorize;

use salvor_registry::ProcessingStatistics;
use salvor_types::{
    DebugLevel, DebugMessage, DebugSummary, ProcessedResult, RawToolResult, truncate,
    value_snippet,
};

pub fn print_batch_header(path: &Path, count: usize) {
    println!("Processing {} envelopes from {}", count, path.display());
    println!();
}

pub fn print_result(index: usize, result: &ProcessedResult, colored: bool) {
    let tool = if result.tool_name.is_empty() {
        "(unnamed)"
    } else {
        &result.tool_name
    };
    println!(
        "[{}] {}  {}  ({}, {} components)",
        index,
        status_label(result, colored),
        tool,
        result.canonical.content_kind().as_str(),
        result.components.len()
    );
    println!("    {}", result.context_summary);
}

pub fn print_stats(stats: &ProcessingStatistics) {
    println!();
    println!("Registry statistics:");
    println!("  Total processed:  {}", stats.total_processed);
    println!("  Succeeded:        {}", stats.success_count);
    println!("  Failed:           {}", stats.error_count);
    println!("  Average duration: {:.1} ms", stats.average_duration_ms);
    if let Some(at) = stats.last_processed_at {
        println!(
            "  Last processed:   {}",
            at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
        );
    }
}

pub fn print_inspection(
    raw: &RawToolResult,
    result: &ProcessedResult,
    summary: &DebugSummary,
    colored: bool,
) {
    println!("Envelope");
    let tool = if raw.tool_name.is_empty() {
        "(unnamed)"
    } else {
        &raw.tool_name
    };
    println!("  Tool:    {}", tool);
    println!("  Content: {} bytes", raw.content.len());
    println!("  Preview: {}", truncate(&raw.content, 120));

    println!();
    println!("Validation");
    for outcome in &result.debug.validations {
        if outcome.valid {
            println!(
                "  {} {:<12} ({})",
                mark_ok(colored),
                outcome.field,
                outcome.actual.as_str()
            );
        } else {
            println!(
                "  {} {:<12} expected {}, got {}: {}",
                mark_fail(colored),
                outcome.field,
                outcome.expected.as_str(),
                outcome.actual.as_str(),
                outcome.message
            );
        }
    }

    if !result.recovery_attempts.is_empty() {
        println!();
        println!("Recovery");
        for attempt in &result.recovery_attempts {
            if attempt.successful {
                println!("  {} {}", mark_ok(colored), attempt.strategy);
            } else {
                println!(
                    "  {} {:<20} {}",
                    mark_fail(colored),
                    attempt.strategy,
                    attempt.failure_message.as_deref().unwrap_or("")
                );
            }
        }
    }

    println!();
    println!("Stages");
    for timing in &result.debug.stages {
        println!("  {:<12} {} ms", timing.stage.as_str(), timing.duration_ms);
    }

    let mut messages: Vec<&DebugMessage> = result
        .debug
        .errors
        .iter()
        .chain(&result.debug.warnings)
        .chain(&result.debug.traces)
        .collect();
    messages.sort_by_key(|message| message.timestamp);
    if !messages.is_empty() {
        println!();
        println!("Messages");
        for message in messages {
            println!(
                "  [{}] {:<12} {}",
                level_label(message.level, colored),
                message.stage.as_str(),
                message.message
            );
            if let Some(data) = &message.data {
                println!("      data: {}", value_snippet(data, 100));
            }
            if let Some(trace) = &message.trace {
                for line in trace.lines() {
                    println!("      {}", line);
                }
            }
        }
    }

    println!();
    println!("Summary");
    println!("  Duration:    {} ms", summary.total_duration_ms);
    println!(
        "  Messages:    {} warnings, {} errors",
        summary.warning_count, summary.error_count
    );
    println!(
        "  Validations: {} passed, {} failed",
        summary.validations_passed, summary.validations_failed
    );
    let recovery = if !summary.recovery_invoked {
        "not invoked"
    } else if summary.recovery_successful {
        "successful"
    } else {
        "failed"
    };
    println!("  Recovery:    {}", recovery);

    if let Some(error) = &result.error {
        println!();
        println!("Error");
        println!("  Kind:      {}", error.kind.as_str());
        println!("  Message:   {}", error.user_message);
        println!("  Detail:    {}", error.technical_detail);
        println!("  Retryable: {}", error.retryable);
        for action in &error.suggested_actions {
            println!("  Try:       {}", action);
        }
    }

    println!();
    println!("Result");
    println!("  Status:   {}", status_label(result, colored));
    println!("  Id:       {}", result.id);
    println!("  Context:  {}", result.context_summary);
}

fn status_label(result: &ProcessedResult, colored: bool) -> String {
    if let Some(error) = &result.error {
        let label = format!("✗ {}", error.kind.as_str());
        return if colored {
            label.red().bold().to_string()
        } else {
            label
        };
    }
    if !result.canonical.success {
        let label = "✗ tool failed".to_string();
        return if colored { label.red().to_string() } else { label };
    }
    if result.was_recovered() {
        let label = "↻ recovered".to_string();
        return if colored {
            label.yellow().bold().to_string()
        } else {
            label
        };
    }
    let label = "✓ ok".to_string();
    if colored {
        label.green().bold().to_string()
    } else {
        label
    }
}

fn level_label(level: DebugLevel, colored: bool) -> String {
    let padded = format!("{:<5}", level.as_str());
    if !colored {
        return padded;
    }
    match level {
        DebugLevel::Error => padded.red().to_string(),
        DebugLevel::Warn => padded.yellow().to_string(),
        _ => padded,
    }
}

fn mark_ok(colored: bool) -> String {
    if colored {
        "✓".green().to_string()
    } else {
        "✓".to_string()
    }
}

fn mark_fail(colored: bool) -> String {
    if colored {
        "✗".red().to_string()
    } else {
        "✗".to_string()
    }
}
