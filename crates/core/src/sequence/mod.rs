use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::source::{resolve_source, MediaKind, MsgSource};
use crate::{Result, RunnerConfig, Section};

/// Backend-independent handle to one renderable stimulus.
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    /// An image loaded from disk at presentation time.
    Image(PathBuf),
    /// Literal text drawn by the presentation toolkit.
    Text(String),
}

/// One display step: a renderable stimulus plus its duration in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub msg: Renderable,
    pub interval: f64,
}

/// Schema of a text stimulus document. Exactly one of the two shapes is
/// expected: a single message, or a list of texts with shared properties.
#[derive(Debug, Deserialize)]
struct StimulusDocument {
    #[serde(default)]
    msg: Option<MessageEntry>,
    #[serde(default, rename = "textList")]
    text_list: Option<Vec<String>>,
    #[serde(default, rename = "textListProperties")]
    text_list_properties: Option<ListProperties>,
}

#[derive(Debug, Deserialize)]
struct MessageEntry {
    text: String,
    interval: f64,
}

#[derive(Debug, Deserialize)]
struct ListProperties {
    interval: f64,
}

/// Builds the complete ordered action sequence for an experiment script.
///
/// Sections are visited in section order; files within a section in
/// lexicographic filename order. Sources that expand into several actions
/// are flattened in place, so the overall sequence stays a single flat list.
pub fn build_sequence(config: &RunnerConfig, sections: &[Section]) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    for section in sections {
        let mut file_names: Vec<String> = Vec::new();
        for entry in fs::read_dir(&section.path)? {
            let entry = entry?;
            file_names.push(entry.file_name().to_string_lossy().into_owned());
        }
        file_names.sort();

        for file_name in &file_names {
            let source = resolve_source(section, file_name)?;
            actions.extend(actions_for_source(config, &source)?);
        }
    }

    Ok(actions)
}

/// Converts one stimulus source into its ordered, possibly empty, list of
/// actions.
///
/// Images yield exactly one action whose duration is the per-file override
/// when present, else the configured image transition. Text sources yield
/// whatever their document describes; a malformed document is logged and
/// yields nothing rather than aborting the run.
pub fn actions_for_source(config: &RunnerConfig, source: &MsgSource) -> Result<Vec<Action>> {
    match source.kind {
        MediaKind::Image => {
            let interval = source
                .interval
                .unwrap_or_else(|| f64::from(config.image_transition));
            Ok(vec![Action {
                msg: Renderable::Image(source.path.clone()),
                interval,
            }])
        }
        MediaKind::Text => {
            let text = fs::read_to_string(&source.path)?;
            Ok(actions_for_document(&text, source))
        }
        MediaKind::Other => {
            tracing::warn!(path = %source.path.display(), "skipping unclassified stimulus file");
            Ok(Vec::new())
        }
    }
}

fn actions_for_document(text: &str, source: &MsgSource) -> Vec<Action> {
    let document: StimulusDocument = match serde_yaml_ng::from_str(text) {
        Ok(document) => document,
        Err(err) => {
            tracing::warn!(
                path = %source.path.display(),
                error = %err,
                "skipping malformed stimulus document"
            );
            return Vec::new();
        }
    };

    if let Some(message) = document.msg {
        // The in-file interval always wins for the single-message shape;
        // the filename override is not consulted here.
        return vec![Action {
            msg: Renderable::Text(message.text),
            interval: message.interval,
        }];
    }

    if let Some(texts) = document.text_list {
        let Some(properties) = document.text_list_properties else {
            tracing::warn!(
                path = %source.path.display(),
                "skipping textList document without textListProperties"
            );
            return Vec::new();
        };
        return texts
            .into_iter()
            .map(|text| Action {
                msg: Renderable::Text(text),
                interval: properties.interval,
            })
            .collect();
    }

    tracing::warn!(
        path = %source.path.display(),
        "skipping stimulus document with neither `msg` nor `textList`"
    );
    Vec::new()
}
