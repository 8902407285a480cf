use serde::{Deserialize, Serialize};

/// Processing stage of one pipeline run.
///
/// The happy path is `Received → Validating → Parsing → Processing →
/// DisplayPrep → Completion`. `Error` is reachable from every working stage
/// except `DisplayPrep`: once a canonical result exists, view and component
/// construction are infallible, so the only exits from `DisplayPrep` are
/// forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Received,
    Validating,
    Parsing,
    Processing,
    DisplayPrep,
    Completion,
    Error,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Validating => "validating",
            Stage::Parsing => "parsing",
            Stage::Processing => "processing",
            Stage::DisplayPrep => "display_prep",
            Stage::Completion => "completion",
            Stage::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Completion | Stage::Error)
    }

    pub fn can_transition_to(&self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Received, Stage::Validating)
                | (Stage::Received, Stage::Error)
                | (Stage::Validating, Stage::Parsing)
                | (Stage::Validating, Stage::Error)
                | (Stage::Parsing, Stage::Processing)
                | (Stage::Parsing, Stage::Error)
                | (Stage::Processing, Stage::DisplayPrep)
                | (Stage::Processing, Stage::Error)
                | (Stage::DisplayPrep, Stage::Completion)
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            Stage::Received,
            Stage::Validating,
            Stage::Parsing,
            Stage::Processing,
            Stage::DisplayPrep,
            Stage::Completion,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_error_not_reachable_from_display_prep() {
        assert!(Stage::Received.can_transition_to(Stage::Error));
        assert!(Stage::Validating.can_transition_to(Stage::Error));
        assert!(Stage::Parsing.can_transition_to(Stage::Error));
        assert!(Stage::Processing.can_transition_to(Stage::Error));
        assert!(!Stage::DisplayPrep.can_transition_to(Stage::Error));
    }

    #[test]
    fn test_terminal_stages_have_no_exits() {
        for next in [
            Stage::Received,
            Stage::Validating,
            Stage::Parsing,
            Stage::Processing,
            Stage::DisplayPrep,
            Stage::Completion,
            Stage::Error,
        ] {
            assert!(!Stage::Completion.can_transition_to(next));
            assert!(!Stage::Error.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_stage_skipping() {
        assert!(!Stage::Received.can_transition_to(Stage::Parsing));
        assert!(!Stage::Validating.can_transition_to(Stage::Completion));
        assert!(!Stage::Parsing.can_transition_to(Stage::DisplayPrep));
    }
}
