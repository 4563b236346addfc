use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;

use crate::{Result, RunnerError};

/// Which program variant is running. The recording variant needs an output
/// directory for the captured session and therefore a stricter config schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Plain presentation of the experiment script.
    Present,
    /// Presentation plus a per-experiment output directory.
    Record,
}

/// Validated runner configuration.
///
/// Field names mirror the keys of the YAML document authors write:
/// `sectionDir`, `outputDir`, `windowWidth`, `windowHeight`,
/// `sectionTransition`, `imageTransition`.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub section_dir: PathBuf,
    /// Only present (and only required) in [`RunMode::Record`].
    pub output_dir: Option<PathBuf>,
    pub window_width: u32,
    pub window_height: u32,
    pub section_transition: u32,
    pub image_transition: u32,
}

impl RunnerConfig {
    /// Reads and validates a configuration file.
    ///
    /// Parsing failures surface as [`RunnerError::ConfigParse`]; schema
    /// failures as [`RunnerError::ConfigInvalid`] carrying every violation
    /// found, so authors can fix a broken file in one pass.
    pub fn load(path: &Path, mode: RunMode) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let document: Value = serde_yaml_ng::from_str(&text)?;
        Self::from_document(&document, mode)
    }

    /// Validates an already parsed document against the fixed schema.
    pub fn from_document(document: &Value, mode: RunMode) -> Result<Self> {
        let mut violations = Vec::new();

        let section_dir = expect_string(document, "sectionDir", &mut violations);
        let window_width = expect_integer(document, "windowWidth", &mut violations);
        let window_height = expect_integer(document, "windowHeight", &mut violations);
        let section_transition = expect_integer(document, "sectionTransition", &mut violations);
        let image_transition = expect_integer(document, "imageTransition", &mut violations);
        let output_dir = match mode {
            RunMode::Present => None,
            RunMode::Record => expect_string(document, "outputDir", &mut violations),
        };

        if !violations.is_empty() {
            return Err(RunnerError::ConfigInvalid { violations });
        }

        // All `expect_*` results are `Some` once the violation list is empty.
        Ok(Self {
            section_dir: PathBuf::from(section_dir.unwrap_or_default()),
            output_dir: output_dir.map(PathBuf::from),
            window_width: window_width.unwrap_or_default(),
            window_height: window_height.unwrap_or_default(),
            section_transition: section_transition.unwrap_or_default(),
            image_transition: image_transition.unwrap_or_default(),
        })
    }
}

fn expect_string(document: &Value, key: &str, violations: &mut Vec<String>) -> Option<String> {
    match document.get(key) {
        None => {
            violations.push(format!("missing required field `{key}` (string)"));
            None
        }
        Some(value) => match value.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                violations.push(format!("field `{key}` must be a string"));
                None
            }
        },
    }
}

fn expect_integer(document: &Value, key: &str, violations: &mut Vec<String>) -> Option<u32> {
    match document.get(key) {
        None => {
            violations.push(format!("missing required field `{key}` (integer)"));
            None
        }
        Some(value) => match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(number) => Some(number),
            None => {
                violations.push(format!("field `{key}` must be a non-negative integer"));
                None
            }
        },
    }
}
