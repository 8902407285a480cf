use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Tunables for one pipeline instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Byte ceiling for the serialized context summary. The bound applies to
    /// the message field; the structural minimum of the document wins when
    /// the ceiling is smaller than that.
    #[serde(default = "default_summary_max_bytes")]
    pub summary_max_bytes: usize,

    /// Probe budget for partial-structure salvage during recovery
    #[serde(default = "default_max_salvage_probes")]
    pub max_salvage_probes: usize,

    /// Validate media references while building the display payload. When
    /// off, `image_valid` stays unset rather than claiming a pass.
    #[serde(default = "default_validate_media")]
    pub validate_media: bool,
}

fn default_summary_max_bytes() -> usize {
    2048
}

fn default_max_salvage_probes() -> usize {
    24
}

fn default_validate_media() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            summary_max_bytes: default_summary_max_bytes(),
            max_salvage_probes: default_max_salvage_probes(),
            validate_media: default_validate_media(),
        }
    }
}

impl PipelineConfig {
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
