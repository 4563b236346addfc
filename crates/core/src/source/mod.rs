use std::fs;
use std::path::PathBuf;

use crate::{Result, RunnerError, Section};

/// Marker that introduces a filename-embedded interval override, as in
/// `photo_i_2.5.png`.
const INTERVAL_MARKER: &str = "_i_";

/// Main content classification of a stimulus file, detected from its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Text,
    Other,
}

/// One stimulus file inside a section, with its classification and any
/// filename-embedded timing metadata resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MsgSource {
    pub path: PathBuf,
    pub kind: MediaKind,
    /// Mime subtype, e.g. `png` for images or `plain` for text.
    pub subtype: String,
    /// File name up to (not including) the last dot.
    pub basename: String,
    /// Per-file duration override in seconds, from the `_i_<float>` marker.
    pub interval: Option<f64>,
    /// Lowercase text after the last dot; empty when the name has no dot.
    pub extension: String,
}

/// Derives a [`MsgSource`] for one file of a section.
///
/// Classification looks at the file's actual bytes, not its extension: a
/// recognised image signature wins, anything else that is valid UTF-8 counts
/// as text, and the rest is opaque. An interval marker whose trailing text is
/// not a number is a fatal input error, matching the fatal error class for
/// authoring mistakes discovered before playback.
pub fn resolve_source(section: &Section, file_name: &str) -> Result<MsgSource> {
    let (basename, extension) = match file_name.rfind('.') {
        Some(dot) => (&file_name[..dot], file_name[dot + 1..].to_lowercase()),
        None => (file_name, String::new()),
    };

    let path = section.path.join(file_name);
    let interval = match basename.rfind(INTERVAL_MARKER) {
        Some(marker) => {
            let text = &basename[marker + INTERVAL_MARKER.len()..];
            let value = text
                .parse::<f64>()
                .map_err(|source| RunnerError::IntervalOverride {
                    path: path.clone(),
                    value: text.to_string(),
                    source,
                })?;
            Some(value)
        }
        None => None,
    };

    let (kind, subtype) = classify(&fs::read(&path)?);

    Ok(MsgSource {
        path,
        kind,
        subtype,
        basename: basename.to_string(),
        interval,
        extension,
    })
}

fn classify(bytes: &[u8]) -> (MediaKind, String) {
    if let Ok(format) = image::guess_format(bytes) {
        let subtype = format
            .to_mime_type()
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .unwrap_or_default();
        return (MediaKind::Image, subtype.to_string());
    }

    if std::str::from_utf8(bytes).is_ok() {
        (MediaKind::Text, "plain".to_string())
    } else {
        (MediaKind::Other, "octet-stream".to_string())
    }
}
