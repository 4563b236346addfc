use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Result, RunnerError};

/// Creates the per-experiment output directory for a recording session.
///
/// The directory is named after the experiment; on collision a numeric
/// suffix is appended (`name_1`, `name_2`, ...) until a free name is found.
/// There is no upper bound on the suffix. Any creation failure other than
/// "already exists" is fatal.
pub fn prepare_output_dir(base: &Path, experiment: &str) -> Result<PathBuf> {
    fs::create_dir_all(base).map_err(|source| RunnerError::OutputDir {
        path: base.to_path_buf(),
        source,
    })?;

    let mut attempt: u32 = 0;
    loop {
        let name = if attempt == 0 {
            experiment.to_string()
        } else {
            format!("{experiment}_{attempt}")
        };
        let candidate = base.join(name);

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(source) => {
                return Err(RunnerError::OutputDir {
                    path: candidate,
                    source,
                })
            }
        }
    }
}
