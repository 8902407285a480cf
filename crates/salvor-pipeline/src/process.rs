use serde_json::json;

use salvor_types::{
    CanonicalResult, ContextView, DebugLevel, DisplayComponent, DisplayPayload, ErrorInfo,
    ErrorKind, ErrorShape, ProcessedResult, RawToolResult, RecoveryAttempt, ResultId, Stage,
};

use crate::assemble::assemble_components;
use crate::config::PipelineConfig;
use crate::parse::parse_strict;
use crate::recovery::RecoveryChain;
use crate::telemetry::TelemetryRecorder;
use crate::transform::{Views, build_views};
use crate::validate::{is_valid, validate_envelope};
use crate::{Error, Result};

/// One configured pipeline instance.
///
/// Holds no per-call state: `process` is re-entrant and an instance can be
/// shared freely across threads.
pub struct ResultPipeline {
    config: PipelineConfig,
    recovery: RecoveryChain,
}

impl Default for ResultPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl ResultPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let recovery = RecoveryChain::standard(config.max_salvage_probes);
        Self { config, recovery }
    }

    /// Swap in a custom recovery chain. A chain without a terminal fallback
    /// makes `RecoveryExhausted` reachable.
    pub fn with_recovery(config: PipelineConfig, recovery: RecoveryChain) -> Self {
        Self { config, recovery }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over one envelope.
    ///
    /// Total: every input maps to a `ProcessedResult` (success, recovered
    /// success, or typed error). Nothing propagates past this boundary.
    pub fn process(&self, raw: &RawToolResult) -> ProcessedResult {
        let id = ResultId::generate();
        let mut telemetry = TelemetryRecorder::start();
        telemetry.log(
            DebugLevel::Info,
            format!("processing result from '{}'", raw.tool_name),
        );

        let mut attempts: Vec<RecoveryAttempt> = Vec::new();
        match self.drive(raw, &mut telemetry, &mut attempts) {
            Ok((canonical, views, components)) => ProcessedResult {
                id,
                tool_name: raw.tool_name.clone(),
                canonical,
                context_summary: views.summary,
                display_payload: views.display,
                components,
                debug: telemetry.finish(Stage::Completion),
                recovery_attempts: attempts,
                error: None,
            },
            Err(error) => self.error_result(id, raw, error, telemetry, attempts),
        }
    }

    fn drive(
        &self,
        raw: &RawToolResult,
        telemetry: &mut TelemetryRecorder,
        attempts: &mut Vec<RecoveryAttempt>,
    ) -> Result<(CanonicalResult, Views, Vec<DisplayComponent>)> {
        telemetry.enter_stage(Stage::Validating);
        let ledger = validate_envelope(raw);
        telemetry.record_validations(&ledger);
        if !is_valid(&ledger) {
            return Err(Error::Validation(ledger));
        }
        telemetry.log(DebugLevel::Debug, "envelope validation passed");

        telemetry.enter_stage(Stage::Parsing);
        telemetry.set_payload_bytes(raw.content.len());
        let canonical = match parse_strict(&raw.content) {
            Ok(parsed) => {
                telemetry.log(DebugLevel::Debug, "strict parse succeeded");
                parsed
            }
            Err(parse_error) => {
                telemetry.log(
                    DebugLevel::Warn,
                    format!("strict parse failed, starting recovery: {}", parse_error),
                );
                let recovered = self.recovery.run(&raw.content, attempts)?;
                if let Some(last) = attempts.last() {
                    telemetry.log_with_data(
                        DebugLevel::Info,
                        format!("recovered via '{}'", last.strategy),
                        json!({"attempts": attempts.len()}),
                    );
                }
                recovered
            }
        };

        let canonical_bytes = serde_json::to_vec(&canonical)
            .map(|bytes| bytes.len())
            .unwrap_or(0);
        telemetry.set_memory_delta(canonical_bytes as i64 - raw.content.len() as i64);

        telemetry.enter_stage(Stage::Processing);
        let views = build_views(&canonical, &raw.tool_name, &self.config)?;
        if let DisplayPayload::Full(payload) = &views.display
            && payload.metadata.image_valid == Some(false)
        {
            let reason = payload
                .metadata
                .image_invalid_reason
                .clone()
                .unwrap_or_default();
            telemetry.log(
                DebugLevel::Warn,
                format!("media reference failed validation: {}", reason),
            );
        }

        // Past this point nothing can fail, which is what keeps the error
        // state unreachable from DisplayPrep.
        telemetry.enter_stage(Stage::DisplayPrep);
        let components = assemble_components(&canonical, &views.display);

        Ok((canonical, views, components))
    }

    fn error_result(
        &self,
        id: ResultId,
        raw: &RawToolResult,
        error: Error,
        mut telemetry: TelemetryRecorder,
        attempts: Vec<RecoveryAttempt>,
    ) -> ProcessedResult {
        let info = error_info(&id, &error);
        telemetry.log_failure("pipeline run failed", &error);

        let canonical = CanonicalResult::failure(info.user_message.as_str());
        let views = build_views(&canonical, &raw.tool_name, &self.config)
            .unwrap_or_else(|_| fallback_error_views(&info.user_message));
        let components = assemble_components(&canonical, &views.display);

        ProcessedResult {
            id,
            tool_name: raw.tool_name.clone(),
            canonical,
            context_summary: views.summary,
            display_payload: views.display,
            components,
            debug: telemetry.finish(Stage::Error),
            recovery_attempts: attempts,
            error: Some(info),
        }
    }
}

fn error_info(id: &ResultId, error: &Error) -> ErrorInfo {
    match error {
        Error::Validation(ledger) => {
            let detail = ledger
                .iter()
                .filter(|outcome| !outcome.valid)
                .map(|outcome| format!("{}: {}", outcome.field, outcome.message))
                .collect::<Vec<_>>()
                .join("; ");
            ErrorInfo::new(
                ErrorKind::Validation,
                "The tool returned an invalid result envelope.",
                detail,
            )
            .with_actions(["verify the tool emits a name and non-empty content"])
            .with_context(json!({"validation_ledger": ledger, "debug_id": id.as_str()}))
        }
        Error::Parse(detail) => ErrorInfo::new(
            ErrorKind::Parse,
            "The tool result could not be parsed.",
            detail.clone(),
        )
        .with_context(json!({"debug_id": id.as_str()})),
        Error::RecoveryExhausted(detail) => ErrorInfo::new(
            ErrorKind::RecoveryExhausted,
            "The tool result could not be repaired.",
            detail.clone(),
        )
        .with_actions(["add a terminal fallback strategy to the recovery chain"])
        .with_context(json!({"debug_id": id.as_str()})),
        Error::Processing(detail) | Error::Config(detail) => ErrorInfo::new(
            ErrorKind::Processing,
            "An internal error occurred while processing the tool result.",
            detail.clone(),
        )
        .with_context(json!({"debug_id": id.as_str()})),
        Error::Io(err) => ErrorInfo::new(
            ErrorKind::Processing,
            "An internal error occurred while processing the tool result.",
            err.to_string(),
        )
        .with_context(json!({"debug_id": id.as_str()})),
    }
}

// Last-resort views for the error path, built without going through serde.
fn fallback_error_views(message: &str) -> Views {
    let shape = ErrorShape::new(message);
    let summary = format!(
        "{{\"error\":true,\"message\":{},\"recoverable\":true,\"timestamp\":\"{}\"}}",
        serde_json::Value::String(message.to_string()),
        shape.timestamp.to_rfc3339()
    );
    Views {
        context: ContextView::Error(shape.clone()),
        summary,
        display: DisplayPayload::Error(shape),
    }
}
