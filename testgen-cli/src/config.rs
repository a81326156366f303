//! Run Configuration
//!
//! YAML configuration describing one run: input sources, the selected
//! generation strategy (with optional completion backend), the template
//! workbook and the output paths.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use testgen_core::StrategyKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub inputs: Inputs,
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default)]
    pub backend: Option<BackendConfig>,
    pub outputs: Outputs,
    #[serde(default = "default_trace_sheet")]
    pub trace_sheet: String,
    #[serde(default = "default_sequence_name")]
    pub sequence_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inputs {
    /// Plain-text requirement sources, one fragment per non-empty line.
    pub requirements_files: Vec<PathBuf>,
    /// Template workbook (YAML form of the external spreadsheet).
    pub template: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// External completion command; receives the prompt as its final
    /// argument and prints the completion on stdout.
    pub command: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_s")]
    pub response_timeout_s: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outputs {
    pub plan_workbook: PathBuf,
    pub sequence_doc: PathBuf,
    pub report: PathBuf,
}

fn default_trace_sheet() -> String {
    "Traceability".to_string()
}

fn default_sequence_name() -> String {
    "MainSequence".to_string()
}

fn default_timeout_s() -> u64 {
    120
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: RunConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
inputs:
  requirements_files:
    - srs.txt
  template: template.yaml
outputs:
  plan_workbook: out/plan.yaml
  sequence_doc: out/sequence.json
  report: out/report.json
"#
        )
        .unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.strategy, StrategyKind::RuleBased);
        assert!(config.backend.is_none());
        assert_eq!(config.trace_sheet, "Traceability");
        assert_eq!(config.sequence_name, "MainSequence");
    }

    #[test]
    fn test_load_backend_assisted_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
inputs:
  requirements_files: [srs.txt, design_notes.md]
  template: template.yaml
strategy: backend-assisted
backend:
  command: /usr/local/bin/complete
  args: ["--session", "default"]
  response_timeout_s: 60
outputs:
  plan_workbook: out/plan.yaml
  sequence_doc: out/sequence.json
  report: out/report.json
trace_sheet: Trace Matrix
"#
        )
        .unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.strategy, StrategyKind::BackendAssisted);
        let backend = config.backend.unwrap();
        assert_eq!(backend.response_timeout_s, 60);
        assert_eq!(backend.args, vec!["--session", "default"]);
        assert_eq!(config.trace_sheet, "Trace Matrix");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(RunConfig::load(Path::new("/nonexistent/config.yaml")).is_err());
    }
}
