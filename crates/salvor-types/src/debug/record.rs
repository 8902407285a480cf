use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::debug::Stage;
use crate::validation::ValidationOutcome;

/// Log severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DebugLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl DebugLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebugLevel::Error => "ERROR",
            DebugLevel::Warn => "WARN",
            DebugLevel::Info => "INFO",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

impl std::fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One leveled log line scoped to a processing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugMessage {
    pub level: DebugLevel,
    pub stage: Stage,
    pub message: String,
    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Rendered error source chain, when the line reports a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl DebugMessage {
    pub fn new(level: DebugLevel, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            level,
            stage,
            message: message.into(),
            timestamp: Utc::now(),
            data: None,
            trace: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

/// Timing row for one stage visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub started_at: DateTime<Utc>,
    pub duration_ms: i64,
}

/// Complete diagnostic trace of one pipeline run.
///
/// Append-only while the run is in flight; `seal` closes it exactly once and
/// every later mutation is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugRecord {
    /// Last stage entered
    pub stage: Stage,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_ms: i64,
    pub stages: Vec<StageTiming>,
    pub warnings: Vec<DebugMessage>,
    pub errors: Vec<DebugMessage>,
    pub traces: Vec<DebugMessage>,
    pub validations: Vec<ValidationOutcome>,
    pub payload_bytes: usize,
    pub memory_delta_bytes: i64,
}

impl DebugRecord {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            stage: Stage::Received,
            started_at: at,
            ended_at: None,
            duration_ms: 0,
            stages: vec![StageTiming {
                stage: Stage::Received,
                started_at: at,
                duration_ms: 0,
            }],
            warnings: Vec::new(),
            errors: Vec::new(),
            traces: Vec::new(),
            validations: Vec::new(),
            payload_bytes: 0,
            memory_delta_bytes: 0,
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Close the current stage timing and open the next one.
    pub fn enter_stage(&mut self, stage: Stage, at: DateTime<Utc>) {
        if self.is_sealed() {
            return;
        }
        if let Some(current) = self.stages.last_mut() {
            current.duration_ms = (at - current.started_at).num_milliseconds().max(0);
        }
        self.stages.push(StageTiming {
            stage,
            started_at: at,
            duration_ms: 0,
        });
        self.stage = stage;
    }

    /// Route a message into the matching severity bucket.
    pub fn push(&mut self, message: DebugMessage) {
        if self.is_sealed() {
            return;
        }
        match message.level {
            DebugLevel::Error => self.errors.push(message),
            DebugLevel::Warn => self.warnings.push(message),
            _ => self.traces.push(message),
        }
    }

    pub fn record_validations(&mut self, outcomes: &[ValidationOutcome]) {
        if self.is_sealed() {
            return;
        }
        self.validations.extend_from_slice(outcomes);
    }

    /// Seal the record. Idempotent: only the first call takes effect.
    pub fn seal(&mut self, at: DateTime<Utc>) {
        if self.is_sealed() {
            return;
        }
        if let Some(current) = self.stages.last_mut() {
            current.duration_ms = (at - current.started_at).num_milliseconds().max(0);
        }
        self.ended_at = Some(at);
        self.duration_ms = (at - self.started_at).num_milliseconds().max(0);
    }

    pub fn stage_sequence(&self) -> Vec<Stage> {
        self.stages.iter().map(|timing| timing.stage).collect()
    }

    /// Whether the recorded stage sequence is a legal walk through the state
    /// machine, starting at `Received` and (if sealed) ending terminal.
    pub fn is_valid_path(&self) -> bool {
        if self.stages.first().map(|timing| timing.stage) != Some(Stage::Received) {
            return false;
        }
        for pair in self.stages.windows(2) {
            if !pair[0].stage.can_transition_to(pair[1].stage) {
                return false;
            }
        }
        match self.stages.last() {
            Some(last) => !self.is_sealed() || last.stage.is_terminal(),
            None => false,
        }
    }
}

/// Per-stage duration row of a [`DebugSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDuration {
    pub stage: Stage,
    pub duration_ms: i64,
}

/// Rolled-up diagnostics produced when a record is sealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugSummary {
    pub total_duration_ms: i64,
    pub stage_durations: Vec<StageDuration>,
    pub warning_count: usize,
    pub error_count: usize,
    pub validations_passed: usize,
    pub validations_failed: usize,
    pub recovery_invoked: bool,
    pub recovery_successful: bool,
}
