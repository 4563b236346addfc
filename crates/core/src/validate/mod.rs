use std::fs;

use crate::source::{resolve_source, MediaKind};
use crate::{Result, RunnerError, Section};

/// Checks every file of every section before any stimulus is shown.
///
/// A file must either be an image (any subtype) or a text file with the
/// extension `yaml` or `yml`. Anything else is a fatal validation error
/// naming the offending section and path. Running this over the whole script
/// up front keeps authoring mistakes from interrupting a session that has
/// already started.
pub fn preflight(sections: &[Section]) -> Result<()> {
    for section in sections {
        for entry in fs::read_dir(&section.path)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let source = resolve_source(section, &file_name)?;

            let supported = match source.kind {
                MediaKind::Image => true,
                MediaKind::Text => source.extension == "yaml" || source.extension == "yml",
                MediaKind::Other => false,
            };
            if !supported {
                return Err(RunnerError::IncompatibleFile {
                    section: section.name.clone(),
                    path: source.path,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn section(root: &Path, dir_name: &str, files: &[(&str, &[u8])]) -> Section {
        let path = root.join(dir_name);
        fs::create_dir(&path).unwrap();
        for (name, bytes) in files {
            fs::write(path.join(name), bytes).unwrap();
        }

        let (number, name, interval) = crate::section::destructure(dir_name).unwrap();
        Section {
            name: name.to_string(),
            number: number.to_string(),
            path,
            interval: interval.to_string(),
        }
    }

    #[test]
    fn accepts_images_and_yaml_text() {
        let root = TempDir::new().unwrap();
        let sections = vec![section(
            root.path(),
            "1_intro_2",
            &[
                ("photo.png", PNG_SIGNATURE),
                ("prompt.yaml", b"msg:\n  text: hi\n  interval: 1\n"),
                ("prompt2.yml", b"textList: [a]\ntextListProperties:\n  interval: 1\n"),
            ],
        )];

        assert!(preflight(&sections).is_ok());
    }

    #[test]
    fn rejects_text_without_a_yaml_extension() {
        let root = TempDir::new().unwrap();
        let sections = vec![section(root.path(), "1_intro_2", &[("notes.txt", b"hello")])];

        let err = preflight(&sections).unwrap_err();
        assert!(matches!(err, RunnerError::IncompatibleFile { section, .. } if section == "intro"));
    }

    #[test]
    fn rejects_opaque_binary_files_even_after_valid_sections() {
        let root = TempDir::new().unwrap();
        let sections = vec![
            section(root.path(), "1_ok_2", &[("photo.png", PNG_SIGNATURE)]),
            section(root.path(), "2_bad_2", &[("blob.dat", &[0x00, 0xff, 0xfe, 0x00])]),
        ];

        let err = preflight(&sections).unwrap_err();
        assert!(matches!(
            err,
            RunnerError::IncompatibleFile { section, path }
                if section == "bad" && path.ends_with("blob.dat")
        ));
    }
}
