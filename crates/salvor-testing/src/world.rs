//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Writing raw envelope files and pipeline configs
//! - Executing the CLI with proper context

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use assert_cmd::Command;
use tempfile::TempDir;

use crate::fixtures;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use salvor_testing::{fixtures, TestWorld};
///
/// let world = TestWorld::new();
/// let input = world.write_envelopes("batch.jsonl", &fixtures::spectrum()).unwrap();
///
/// let result = world.run(&["process", input.to_str().unwrap()]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the temp directory root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write an arbitrary file under the temp root, returning its path.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write raw `(tool, content)` envelopes as a JSONL input file.
    pub fn write_envelopes(&self, name: &str, envelopes: &[(&str, &str)]) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        fixtures::write_jsonl(&path, envelopes)?;
        Ok(path)
    }

    /// Execute the salvor binary with the given arguments.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("salvor")
            .map_err(|e| anyhow::anyhow!("Failed to find salvor binary: {}", e))?;

        cmd.current_dir(self.temp_dir.path());
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
