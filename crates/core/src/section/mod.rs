use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::{Result, RunnerError};

/// One directory of stimulus files within the experiment script.
///
/// `number` and `interval` are kept as the literal digit strings taken from
/// the directory name so that `<number>_<name>_<interval>` always re-joins
/// into the original name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub number: String,
    pub path: PathBuf,
    pub interval: String,
}

fn section_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]+_[a-z0-9_-]+_[0-9]+$").expect("section name pattern must compile")
    })
}

/// Splits a section directory name into `(number, name, interval)`.
///
/// The name token may itself contain underscores, so the split points are
/// the FIRST and the LAST underscore of the whole string, not the first two.
/// Returns `None` when the name has fewer than two underscores.
pub fn destructure(dir_name: &str) -> Option<(&str, &str, &str)> {
    let first = dir_name.find('_')?;
    let last = dir_name.rfind('_')?;
    if first == last {
        return None;
    }

    Some((
        &dir_name[..first],
        &dir_name[first + 1..last],
        &dir_name[last + 1..],
    ))
}

/// Reads the experiment script's section directories.
///
/// Sections come back in lexicographic order of their directory names, the
/// same order `sorted(os.listdir(...))` style tooling produces. The leading
/// digits are NOT compared numerically: `10_b_1` sorts before `2_a_1`.
///
/// Any entry that fails the naming convention aborts the whole run with
/// [`RunnerError::SectionName`]; there is no per-section skip.
pub fn read_sections(section_dir: &Path) -> Result<Vec<Section>> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(section_dir)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    let mut sections = Vec::with_capacity(names.len());
    for dir_name in names {
        if !section_name_pattern().is_match(&dir_name) {
            return Err(RunnerError::SectionName(dir_name));
        }

        // The pattern guarantees at least two underscores.
        let (number, name, interval) =
            destructure(&dir_name).ok_or_else(|| RunnerError::SectionName(dir_name.clone()))?;
        sections.push(Section {
            name: name.to_string(),
            number: number.to_string(),
            path: section_dir.join(&dir_name),
            interval: interval.to_string(),
        });
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script_with(dirs: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        for dir in dirs {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        root
    }

    #[test]
    fn destructures_and_rejoins_simple_names() {
        let (number, name, interval) = destructure("1_welcome_3").unwrap();
        assert_eq!((number, name, interval), ("1", "welcome", "3"));
        assert_eq!(format!("{number}_{name}_{interval}"), "1_welcome_3");
    }

    #[test]
    fn name_token_may_contain_underscores() {
        let (number, name, interval) = destructure("02_long_task_name_10").unwrap();
        assert_eq!(number, "02");
        assert_eq!(name, "long_task_name");
        assert_eq!(interval, "10");
        assert_eq!(format!("{number}_{name}_{interval}"), "02_long_task_name_10");
    }

    #[test]
    fn rejects_names_without_two_underscores() {
        assert!(destructure("welcome").is_none());
        assert!(destructure("1_welcome").is_none());
    }

    #[test]
    fn orders_sections_lexicographically_not_numerically() {
        let root = script_with(&["2_a_1", "10_b_1"]);
        let sections = read_sections(root.path()).unwrap();

        let numbers: Vec<&str> = sections.iter().map(|s| s.number.as_str()).collect();
        assert_eq!(numbers, ["10", "2"]);
    }

    #[test]
    fn builds_section_records_from_directory_names() {
        let root = script_with(&["1_baseline_2"]);
        let sections = read_sections(root.path()).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "baseline");
        assert_eq!(sections[0].number, "1");
        assert_eq!(sections[0].interval, "2");
        assert_eq!(sections[0].path, root.path().join("1_baseline_2"));
    }

    #[test]
    fn a_misnamed_directory_fails_the_whole_run() {
        let root = script_with(&["1_good_2", "bad name"]);
        let err = read_sections(root.path()).unwrap_err();

        assert!(matches!(err, RunnerError::SectionName(name) if name == "bad name"));
    }

    #[test]
    fn rejects_uppercase_name_tokens() {
        let root = script_with(&["1_Welcome_2"]);
        assert!(read_sections(root.path()).is_err());
    }
}
