//! Core library for the Stimulus Runner experiment presenter.
//!
//! The crate turns an on-disk experiment script (a directory of "section"
//! directories holding image and YAML text stimuli) plus a YAML
//! configuration file into a flat, ordered sequence of display actions.
//! Each module owns one stage of that pipeline: configuration loading,
//! section discovery, stimulus resolution, pre-flight validation, sequence
//! building, and finally the driver boundary that plays the sequence back.
//! Data flows strictly one way; every stage consumes the previous stage's
//! immutable output.

pub mod config;
pub mod error;
pub mod player;
pub mod record;
pub mod section;
pub mod sequence;
pub mod source;
pub mod validate;

pub use config::{RunMode, RunnerConfig};
pub use error::{Result, RunnerError};
pub use player::{play, HeadlessDriver, PresentationDriver};
pub use record::prepare_output_dir;
pub use section::{destructure, read_sections, Section};
pub use sequence::{actions_for_source, build_sequence, Action, Renderable};
pub use source::{resolve_source, MediaKind, MsgSource};
pub use validate::preflight;
