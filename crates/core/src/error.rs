use std::path::PathBuf;

/// Result alias that carries the custom [`RunnerError`] type.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Common error type for the core crate.
///
/// Every variant is fatal: the runner either builds the complete action
/// sequence or aborts before any stimulus is shown. Recoverable conditions
/// (a stimulus document missing its expected keys) never surface here; they
/// are logged and skipped inside the sequence builder.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The configuration file is not valid YAML.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),
    /// The configuration parsed but one or more schema checks failed. All
    /// violations are collected before this is raised.
    #[error("invalid configuration:\n  {}", .violations.join("\n  "))]
    ConfigInvalid { violations: Vec<String> },
    /// A section directory name does not follow the naming convention.
    #[error("section directory name `{0}` does not match `<number>_<name>_<interval>`")]
    SectionName(String),
    /// A filename-embedded interval override could not be parsed as a number.
    #[error("invalid interval override `{value}` in `{}`: {source}", .path.display())]
    IntervalOverride {
        path: PathBuf,
        value: String,
        source: std::num::ParseFloatError,
    },
    /// Pre-flight validation found a file that is neither an image nor a
    /// YAML text document.
    #[error("section `{section}` contains an incompatible file: {}", .path.display())]
    IncompatibleFile { section: String, path: PathBuf },
    /// The recording output directory could not be created.
    #[error("failed to create output directory `{}`: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
