use std::path::PathBuf;

use anyhow::Result;
use once_cell::sync::OnceCell;
use salvor_pipeline::{PipelineConfig, ResultPipeline};
use salvor_registry::ResultStore;

/// Lazily-initialized state shared by all command handlers.
pub struct ExecutionContext {
    config_path: Option<PathBuf>,
    config: OnceCell<PipelineConfig>,
    pipeline: OnceCell<ResultPipeline>,
    store: ResultStore,
}

impl ExecutionContext {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            config: OnceCell::new(),
            pipeline: OnceCell::new(),
            store: ResultStore::new(),
        }
    }

    pub fn config(&self) -> Result<&PipelineConfig> {
        self.config.get_or_try_init(|| match &self.config_path {
            Some(path) => Ok(PipelineConfig::load_from(path)?),
            None => Ok(PipelineConfig::default()),
        })
    }

    pub fn pipeline(&self) -> Result<&ResultPipeline> {
        let config = self.config()?;
        Ok(self
            .pipeline
            .get_or_init(|| ResultPipeline::new(config.clone())))
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lazy_config_loading() {
        let ctx = ExecutionContext::new(None);
        assert!(ctx.config.get().is_none());

        let config = ctx.config().unwrap();
        assert_eq!(config.summary_max_bytes, 2048);
        assert!(ctx.config.get().is_some());
        assert!(ctx.pipeline.get().is_none());
    }

    #[test]
    fn test_config_file_feeds_the_pipeline() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("salvor.toml");
        fs::write(&config_path, "summary_max_bytes = 256\n").unwrap();

        let ctx = ExecutionContext::new(Some(config_path));
        let pipeline = ctx.pipeline().unwrap();
        assert_eq!(pipeline.config().summary_max_bytes, 256);
        // untouched keys keep their defaults
        assert_eq!(pipeline.config().max_salvage_probes, 24);
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let ctx = ExecutionContext::new(Some(PathBuf::from("/nonexistent/salvor.toml")));
        let config = ctx.config().unwrap();
        assert_eq!(config.summary_max_bytes, 2048);
    }
}
