pub mod assemble;
pub mod config;
pub mod error;
pub mod parse;
pub mod process;
pub mod recovery;
pub mod telemetry;
pub mod transform;
pub mod validate;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use process::ResultPipeline;
pub use recovery::{RecoveryChain, RecoveryStrategy};
pub use telemetry::TelemetryRecorder;
