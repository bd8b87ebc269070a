use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crate::catalog::FieldCatalog;
use crate::error::{ExportError, ExportResult};

/// Render one row of values.
///
/// Uses the shortest representation that parses back to the same `f64`,
/// independent of locale: `0`, `1.5`, `-0.25`, `NaN`, `inf`.
pub fn format_row(values: &[f64]) -> String {
    let mut line = String::with_capacity(values.len() * 12);
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(line, "{v}");
    }
    line
}

/// Write the header line for `catalog` and flush.
pub fn write_header<W: Write>(writer: &mut W, catalog: &FieldCatalog) -> io::Result<()> {
    write_line(writer, catalog.header())
}

/// Write one data row and flush.
pub fn write_row<W: Write>(writer: &mut W, values: &[f64]) -> io::Result<()> {
    write_line(writer, format_row(values))
}

/// Write a `#` annotation line and flush. Line breaks in `text` are folded
/// into spaces so the annotation stays on one line.
pub fn write_comment<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    let text = text.replace(['\r', '\n'], " ");
    write_line(writer, format!("# {text}"))
}

/// Terminate `line`, hand it to the writer in one piece and flush.
fn write_line<W: Write>(writer: &mut W, mut line: String) -> io::Result<()> {
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    writer.flush()
}

// ---------------------------------------------------------------------------
// Reading exports back
// ---------------------------------------------------------------------------

/// A parsed export: column names plus numeric rows.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub comments: Vec<String>,
}

impl CsvTable {
    /// Parse an export. `#` lines are collected as comments; blank lines
    /// are skipped. Every row must have as many fields as the header.
    pub fn read<R: BufRead>(reader: R) -> ExportResult<Self> {
        let mut table = CsvTable::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = idx + 1;

            if line.trim().is_empty() {
                continue;
            }
            if let Some(text) = line.strip_prefix('#') {
                table.comments.push(text.trim().to_string());
                continue;
            }
            if table.header.is_empty() {
                table.header = line.split(',').map(str::to_string).collect();
                continue;
            }

            let row = line
                .split(',')
                .map(|f| {
                    f.trim().parse::<f64>().map_err(|e| ExportError::Parse {
                        line: lineno,
                        message: format!("{f:?}: {e}"),
                    })
                })
                .collect::<ExportResult<Vec<f64>>>()?;

            if row.len() != table.header.len() {
                return Err(ExportError::Parse {
                    line: lineno,
                    message: format!(
                        "expected {} fields, found {}",
                        table.header.len(),
                        row.len()
                    ),
                });
            }
            table.rows.push(row);
        }

        Ok(table)
    }

    /// Parse an export file from disk.
    pub fn read_file(path: impl AsRef<std::path::Path>) -> ExportResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::read(io::BufReader::new(file))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }
}
