use chrono::Utc;
use serde_json::Value;

use salvor_types::{
    DebugLevel, DebugMessage, DebugRecord, DebugSummary, RecoveryAttempt, Stage, StageDuration,
    ValidationOutcome,
};

/// Stage-transition recorder for one pipeline run.
///
/// Owns the run's `DebugRecord` until `finish` hands it back sealed. Logging
/// never fails, and appends after sealing are silently dropped, so
/// instrumentation can never take the pipeline down with it.
#[derive(Debug)]
pub struct TelemetryRecorder {
    record: DebugRecord,
}

impl TelemetryRecorder {
    pub fn start() -> Self {
        Self {
            record: DebugRecord::new(Utc::now()),
        }
    }

    pub fn stage(&self) -> Stage {
        self.record.stage
    }

    pub fn enter_stage(&mut self, stage: Stage) {
        self.record.enter_stage(stage, Utc::now());
    }

    pub fn log(&mut self, level: DebugLevel, message: impl Into<String>) {
        let message = DebugMessage::new(level, self.record.stage, message);
        self.record.push(message);
    }

    pub fn log_with_data(&mut self, level: DebugLevel, message: impl Into<String>, data: Value) {
        let message = DebugMessage::new(level, self.record.stage, message).with_data(data);
        self.record.push(message);
    }

    /// Log an error with its rendered source chain as the trace.
    pub fn log_failure(&mut self, message: impl Into<String>, error: &dyn std::error::Error) {
        let message = DebugMessage::new(DebugLevel::Error, self.record.stage, message)
            .with_trace(render_chain(error));
        self.record.push(message);
    }

    pub fn record_validations(&mut self, outcomes: &[ValidationOutcome]) {
        self.record.record_validations(outcomes);
    }

    pub fn set_payload_bytes(&mut self, bytes: usize) {
        self.record.payload_bytes = bytes;
    }

    pub fn set_memory_delta(&mut self, delta: i64) {
        self.record.memory_delta_bytes = delta;
    }

    /// Move to the terminal stage, seal, and hand the record back.
    pub fn finish(mut self, terminal: Stage) -> DebugRecord {
        let now = Utc::now();
        self.record.enter_stage(terminal, now);
        self.record.seal(now);
        self.record
    }
}

/// Render an error and its source chain into one trace string.
pub fn render_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    rendered
}

/// Roll a sealed record and the run's recovery attempts into a summary.
pub fn summarize(record: &DebugRecord, attempts: &[RecoveryAttempt]) -> DebugSummary {
    DebugSummary {
        total_duration_ms: record.duration_ms,
        stage_durations: record
            .stages
            .iter()
            .map(|timing| StageDuration {
                stage: timing.stage,
                duration_ms: timing.duration_ms,
            })
            .collect(),
        warning_count: record.warnings.len(),
        error_count: record.errors.len(),
        validations_passed: record.validations.iter().filter(|o| o.valid).count(),
        validations_failed: record.validations.iter().filter(|o| !o.valid).count(),
        recovery_invoked: !attempts.is_empty(),
        recovery_successful: attempts.iter().any(|attempt| attempt.successful),
    }
}
