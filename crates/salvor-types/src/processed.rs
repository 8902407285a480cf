use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalResult;
use crate::component::DisplayComponent;
use crate::debug::DebugRecord;
use crate::id::ResultId;
use crate::report::{ErrorInfo, RecoveryAttempt};
use crate::view::DisplayPayload;

/// Terminal artifact of one pipeline run.
///
/// Owned by the registry after insertion; read-only to everything else.
/// Every run produces one of these (success, recovered success, or typed
/// error), so holding a `ProcessedResult` never implies the tool succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub id: ResultId,
    pub tool_name: String,
    pub canonical: CanonicalResult,

    /// Serialized, size-bounded context summary document.
    pub context_summary: String,
    pub display_payload: DisplayPayload,
    pub components: Vec<DisplayComponent>,
    pub debug: DebugRecord,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recovery_attempts: Vec<RecoveryAttempt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl ProcessedResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when the canonical result came out of a recovery strategy rather
    /// than the strict parse.
    pub fn was_recovered(&self) -> bool {
        self.recovery_attempts
            .iter()
            .any(|attempt| attempt.successful)
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.canonical.success
    }
}
