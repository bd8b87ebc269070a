use std::path::PathBuf;

/// Failures raised while exporting flight data.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("cannot create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no free file name in {dir} (tried sequence numbers 1..={limit})")]
    NamesExhausted { dir: PathBuf, limit: u32 },

    #[error("write to {path} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed export at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// True for failures that prevent a session from opening.
    pub fn is_creation_failure(&self) -> bool {
        matches!(self, Self::Create { .. } | Self::NamesExhausted { .. })
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let e = ExportError::Create {
            path: PathBuf::from("out/simulation-001.csv"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(e.to_string().contains("simulation-001.csv"));
        assert!(e.is_creation_failure());

        let e = ExportError::NamesExhausted { dir: PathBuf::from("."), limit: 9 };
        assert!(e.to_string().contains("1..=9"));
        assert!(e.is_creation_failure());
    }
}
