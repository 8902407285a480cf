mod strategies;

pub use strategies::{
    FallbackSynthesis, FieldExtraction, MinimalExtraction, PartialSalvage, StructuralCleanup,
};

use salvor_types::{CanonicalResult, RecoveryAttempt};

use crate::config::PipelineConfig;
use crate::{Error, Result};

/// One way of pulling a canonical result out of content the strict parser
/// rejected. Strategies are pure: same content in, same outcome out.
pub trait RecoveryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Attempt recovery. The error string explains why this strategy could
    /// not apply; the next strategy in the chain gets its turn.
    fn attempt(&self, content: &str) -> std::result::Result<CanonicalResult, String>;
}

/// Ordered list of recovery strategies, tried front to back.
pub struct RecoveryChain {
    strategies: Vec<Box<dyn RecoveryStrategy>>,
}

impl RecoveryChain {
    pub fn new(strategies: Vec<Box<dyn RecoveryStrategy>>) -> Self {
        Self { strategies }
    }

    /// The canonical chain, most structure-preserving first. The terminal
    /// fallback cannot fail, so this chain always produces a result.
    pub fn standard(max_salvage_probes: usize) -> Self {
        Self::new(vec![
            Box::new(FieldExtraction),
            Box::new(MinimalExtraction),
            Box::new(StructuralCleanup),
            Box::new(PartialSalvage::new(max_salvage_probes)),
            Box::new(FallbackSynthesis),
        ])
    }

    pub fn push(&mut self, strategy: Box<dyn RecoveryStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Try strategies in order until one succeeds, recording one attempt per
    /// strategy tried. Exhaustion is only reachable for custom chains that
    /// lack a terminal fallback.
    pub fn run(
        &self,
        content: &str,
        attempts: &mut Vec<RecoveryAttempt>,
    ) -> Result<CanonicalResult> {
        for strategy in &self.strategies {
            match strategy.attempt(content) {
                Ok(recovered) => {
                    attempts.push(RecoveryAttempt::succeeded(strategy.name(), recovered.clone()));
                    return Ok(recovered);
                }
                Err(message) => {
                    attempts.push(RecoveryAttempt::failed(strategy.name(), message));
                }
            }
        }
        Err(Error::RecoveryExhausted(format!(
            "all {} strategies failed",
            self.strategies.len()
        )))
    }
}

impl Default for RecoveryChain {
    fn default() -> Self {
        Self::standard(PipelineConfig::default().max_salvage_probes)
    }
}

impl std::fmt::Debug for RecoveryChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryChain")
            .field("strategies", &self.names())
            .finish()
    }
}
