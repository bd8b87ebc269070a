use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::catalog::FieldCatalog;
use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::event::FlightEventKind;
use crate::io::{csv, naming};
use crate::notify::{LogNotifier, Notifier};
use crate::snapshot::SimulationSnapshot;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Observable phase of an export session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No file open.
    Idle,
    /// File open, header written, rows being appended.
    Open,
    /// A write failed mid-run; the handle was dropped and further rows are
    /// discarded until the run ends.
    Closed,
}

/// Outcome of a run that produced a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub path: PathBuf,
    pub rows: usize,
    /// False when a write failure cut the file short.
    pub complete: bool,
}

enum Session {
    Idle,
    Open {
        path: PathBuf,
        sink: Box<dyn Write>,
        rows: usize,
    },
    Closed {
        path: PathBuf,
        rows: usize,
    },
}

// ---------------------------------------------------------------------------
// Inertial export logger
// ---------------------------------------------------------------------------

/// Appends one CSV row of flight state per simulation step.
///
/// At most one file is open at a time. Every line is flushed as soon as it
/// is written, so an aborted host loses at most the line in flight.
pub struct InertialExport {
    config: ExportConfig,
    catalog: FieldCatalog,
    notifier: Box<dyn Notifier>,
    session: Session,
    last: Option<SessionSummary>,
}

/// Box a destination for export lines.
///
/// Unbuffered: every line is one `write_all` plus a flush, and a line that
/// failed must not be written again when the handle is dropped.
fn line_sink<W: Write + 'static>(inner: W) -> Box<dyn Write> {
    Box::new(inner)
}

impl InertialExport {
    pub fn new(config: ExportConfig) -> Self {
        Self::with_notifier(config, LogNotifier)
    }

    pub fn with_notifier(config: ExportConfig, notifier: impl Notifier + 'static) -> Self {
        Self {
            config,
            catalog: FieldCatalog::standard(),
            notifier: Box::new(notifier),
            session: Session::Idle,
            last: None,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn state(&self) -> SessionState {
        match self.session {
            Session::Idle => SessionState::Idle,
            Session::Open { .. } => SessionState::Open,
            Session::Closed { .. } => SessionState::Closed,
        }
    }

    /// Path of the current run's file, if one was created.
    pub fn path(&self) -> Option<&Path> {
        match &self.session {
            Session::Idle => None,
            Session::Open { path, .. } | Session::Closed { path, .. } => Some(path),
        }
    }

    /// Data rows written in the current run.
    pub fn rows_written(&self) -> usize {
        match self.session {
            Session::Idle => 0,
            Session::Open { rows, .. } | Session::Closed { rows, .. } => rows,
        }
    }

    /// Summary of the most recent run that produced a file.
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last.as_ref()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Create the next free export file and write its header.
    ///
    /// A session left open by a previous run is closed first. On failure
    /// the host's notifier is told once and the logger stays idle, so
    /// later steps are silently skipped.
    pub fn on_simulation_start(
        &mut self,
        _snapshot: &dyn SimulationSnapshot,
    ) -> ExportResult<PathBuf> {
        if self.state() != SessionState::Idle {
            warn!(
                path = ?self.path(),
                "ending CSV export of previous run (simulation end not received)"
            );
            self.close();
        }

        match naming::create_next(&self.config) {
            Ok((path, file)) => {
                info!(path = %path.display(), "CSV export file created");
                self.open_with(path, line_sink(file))
            }
            Err(e) => Err(self.report_setup_failure(e)),
        }
    }

    /// Append one row for `snapshot`. No-op unless a file is open.
    pub fn on_simulation_step(&mut self, snapshot: &dyn SimulationSnapshot) {
        let Session::Open { path, sink, rows } = &mut self.session else {
            return;
        };

        let values = self.catalog.values(snapshot);
        match csv::write_row(sink, &values) {
            Ok(()) => {
                *rows += 1;
                debug!(t = snapshot.time(), rows = *rows, "logged step to CSV file");
            }
            Err(source) => {
                let err = ExportError::Write { path: path.clone(), source };
                error!(error = %err, "CSV export stopped; remaining steps will not be logged");
                self.fault();
            }
        }
    }

    /// Annotate a flight event as a `#` line, when enabled in the config.
    /// Altitude events are never annotated.
    pub fn on_flight_event(&mut self, snapshot: &dyn SimulationSnapshot, kind: &FlightEventKind) {
        if !self.config.log_events || !kind.is_notable() {
            return;
        }
        let Session::Open { path, sink, .. } = &mut self.session else {
            return;
        };

        let text = format!("Event {kind} at t={}", snapshot.time());
        if let Err(source) = csv::write_comment(sink, &text) {
            let err = ExportError::Write { path: path.clone(), source };
            error!(error = %err, "CSV export stopped; remaining steps will not be logged");
            self.fault();
        } else {
            info!(event = %kind, "logged event to CSV file");
        }
    }

    /// Close the file, if any. `error` is the host's failure reason when the
    /// run aborted.
    pub fn on_simulation_end(
        &mut self,
        _snapshot: &dyn SimulationSnapshot,
        error: Option<&dyn std::error::Error>,
    ) -> Option<SessionSummary> {
        if let Some(e) = error {
            warn!(error = %e, "simulation ended with an error");
        }
        self.close()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn open_with(&mut self, path: PathBuf, mut sink: Box<dyn Write>) -> ExportResult<PathBuf> {
        if let Err(source) = csv::write_header(&mut sink, &self.catalog) {
            drop(sink);
            // The file is ours and holds nothing useful; free the slot.
            if let Err(e) = fs::remove_file(&path) {
                debug!(path = %path.display(), error = %e, "could not remove partial CSV file");
            }
            let err = ExportError::Write { path, source };
            return Err(self.report_setup_failure(err));
        }

        self.session = Session::Open { path: path.clone(), sink, rows: 0 };
        Ok(path)
    }

    fn report_setup_failure(&self, err: ExportError) -> ExportError {
        error!(error = %err, "error opening CSV export file");
        self.notifier
            .notify_error("Error Opening File", &format!("Error opening file:\n{err}"));
        err
    }

    /// Drop a handle known to be broken, keeping the run's bookkeeping.
    fn fault(&mut self) {
        if let Session::Open { path, rows, .. } = std::mem::replace(&mut self.session, Session::Idle) {
            self.session = Session::Closed { path, rows };
        }
    }

    fn close(&mut self) -> Option<SessionSummary> {
        let summary = match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Idle => None,
            Session::Open { path, mut sink, rows } => {
                let complete = match sink.flush() {
                    Ok(()) => true,
                    Err(e) => {
                        error!(path = %path.display(), error = %e, "flush on close failed");
                        false
                    }
                };
                info!(path = %path.display(), rows, "closing CSV file");
                Some(SessionSummary { path, rows, complete })
            }
            Session::Closed { path, rows } => {
                info!(path = %path.display(), rows, "CSV file was cut short by a write error");
                Some(SessionSummary { path, rows, complete: false })
            }
        };
        if summary.is_some() {
            self.last.clone_from(&summary);
        }
        summary
    }
}

impl Default for InertialExport {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

impl Drop for InertialExport {
    fn drop(&mut self) {
        if let Session::Open { path, sink, rows } = &mut self.session {
            warn!(
                path = %path.display(),
                rows = *rows,
                "CSV export dropped while open (simulation end not received)"
            );
            let _ = sink.flush();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
