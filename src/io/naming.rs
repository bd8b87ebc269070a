use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};

/// Create the first free `prefix-NNN.ext` file in the output directory.
///
/// Candidates are tried from sequence number 1 upward; each is opened with
/// create-new semantics, so an existing file is never truncated and two
/// exporters racing for the same name cannot both win it.
pub fn create_next(config: &ExportConfig) -> ExportResult<(PathBuf, File)> {
    for n in 1..=config.max_sequence {
        let path = config.candidate(n);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(ExportError::Create { path, source }),
        }
    }

    Err(ExportError::NamesExhausted {
        dir: config.output_dir.clone(),
        limit: config.max_sequence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfigBuilder;
    use std::fs;

    #[test]
    fn first_file_is_001() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfigBuilder::new().output_dir(dir.path()).build();
        let (path, _) = create_next(&config).unwrap();
        assert_eq!(path, dir.path().join("simulation-001.csv"));
        assert!(path.exists());
    }

    #[test]
    fn skips_existing_files_without_touching_them() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfigBuilder::new().output_dir(dir.path()).build();
        for n in 1..=5 {
            fs::write(config.candidate(n), format!("run {n}\n")).unwrap();
        }

        let (path, _) = create_next(&config).unwrap();
        assert_eq!(path, dir.path().join("simulation-006.csv"));
        for n in 1..=5 {
            assert_eq!(fs::read_to_string(config.candidate(n)).unwrap(), format!("run {n}\n"));
        }
    }

    #[test]
    fn fills_the_first_gap() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfigBuilder::new().output_dir(dir.path()).build();
        fs::write(config.candidate(1), "").unwrap();
        fs::write(config.candidate(3), "").unwrap();
        let (path, _) = create_next(&config).unwrap();
        assert_eq!(path, config.candidate(2));
    }

    #[test]
    fn exhausted_sequence_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfigBuilder::new()
            .output_dir(dir.path())
            .max_sequence(2)
            .build();
        create_next(&config).unwrap();
        create_next(&config).unwrap();
        let err = create_next(&config).unwrap_err();
        assert!(matches!(err, ExportError::NamesExhausted { limit: 2, .. }));
    }

    #[test]
    fn missing_directory_is_a_create_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfigBuilder::new()
            .output_dir(dir.path().join("does-not-exist"))
            .build();
        let err = create_next(&config).unwrap_err();
        assert!(matches!(err, ExportError::Create { .. }));
    }
}
