use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Export configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub extension: String,
    pub sequence_width: usize,   // zero-padded digits in the sequence number
    pub max_sequence: u32,       // last candidate tried before giving up
    pub log_events: bool,        // annotate flight events as `#` lines
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_prefix: "simulation".into(),
            extension: "csv".into(),
            sequence_width: 3,   // simulation-001.csv
            max_sequence: 9999,
            log_events: false,
        }
    }
}

impl ExportConfig {
    /// File name for sequence number `n`, e.g. `simulation-007.csv`.
    pub fn file_name(&self, n: u32) -> String {
        format!(
            "{}-{:0width$}.{}",
            self.file_prefix,
            n,
            self.extension,
            width = self.sequence_width
        )
    }

    /// Full candidate path for sequence number `n`.
    pub fn candidate(&self, n: u32) -> PathBuf {
        self.output_dir.join(self.file_name(n))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

// ---------------------------------------------------------------------------
// Config builder
// ---------------------------------------------------------------------------

pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn new() -> Self {
        Self { config: ExportConfig::default() }
    }

    pub fn output_dir(mut self, v: impl Into<PathBuf>) -> Self { self.config.output_dir = v.into(); self }
    pub fn file_prefix(mut self, v: impl Into<String>) -> Self { self.config.file_prefix = v.into(); self }
    pub fn extension(mut self, v: impl Into<String>) -> Self { self.config.extension = v.into(); self }
    pub fn sequence_width(mut self, v: usize) -> Self { self.config.sequence_width = v; self }
    pub fn max_sequence(mut self, v: u32) -> Self { self.config.max_sequence = v; self }
    pub fn log_events(mut self, v: bool) -> Self { self.config.log_events = v; self }

    pub fn build(self) -> ExportConfig {
        self.config
    }
}

impl Default for ExportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_are_zero_padded() {
        let c = ExportConfig::default();
        assert_eq!(c.file_name(1), "simulation-001.csv");
        assert_eq!(c.file_name(42), "simulation-042.csv");
        // Padding is a minimum width, not a cap.
        assert_eq!(c.file_name(1234), "simulation-1234.csv");
    }

    #[test]
    fn builder_overrides_defaults() {
        let c = ExportConfigBuilder::new()
            .output_dir("/tmp/flights")
            .file_prefix("hitl")
            .sequence_width(5)
            .log_events(true)
            .build();
        assert_eq!(c.candidate(3), PathBuf::from("/tmp/flights/hitl-00003.csv"));
        assert!(c.log_events);
        assert_eq!(c.max_sequence, 9999);
    }
}
