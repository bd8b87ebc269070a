use crate::event::FlightEventKind;
use crate::session::InertialExport;
use crate::snapshot::SimulationSnapshot;

/// Trait for simulation listeners.
///
/// A host calls `start_simulation`, then `post_step` once per integration
/// step (with `handle_flight_event` interleaved), then `end_simulation`,
/// once per run and in that order. Listeners must not fail the host: every
/// hook returns nothing and handles its own errors.
pub trait SimulationListener {
    fn start_simulation(&mut self, _status: &dyn SimulationSnapshot) {}

    fn post_step(&mut self, _status: &dyn SimulationSnapshot) {}

    fn handle_flight_event(&mut self, _status: &dyn SimulationSnapshot, _event: &FlightEventKind) {}

    fn end_simulation(
        &mut self,
        _status: &dyn SimulationSnapshot,
        _error: Option<&dyn std::error::Error>,
    ) {
    }

    /// Name the host shows in its extension list and uses in log lines.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// How a host presents an extension in its menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

impl ExtensionInfo {
    pub const INERTIAL_EXPORT: ExtensionInfo = ExtensionInfo {
        name: "Inertial Data Export",
        category: "Reports",
        description: "Exports inertial and global position/velocity/acceleration and \
                      orientation/rates data to a CSV file in the source root directory",
    };
}

impl SimulationListener for InertialExport {
    fn start_simulation(&mut self, status: &dyn SimulationSnapshot) {
        // Failures are already logged and sent to the notifier.
        let _ = self.on_simulation_start(status);
    }

    fn post_step(&mut self, status: &dyn SimulationSnapshot) {
        self.on_simulation_step(status);
    }

    fn handle_flight_event(&mut self, status: &dyn SimulationSnapshot, event: &FlightEventKind) {
        self.on_flight_event(status, event);
    }

    fn end_simulation(
        &mut self,
        status: &dyn SimulationSnapshot,
        error: Option<&dyn std::error::Error>,
    ) {
        self.on_simulation_end(status, error);
    }

    fn name(&self) -> &str {
        ExtensionInfo::INERTIAL_EXPORT.name
    }
}

// ---------------------------------------------------------------------------
// Replaying recorded flights
// ---------------------------------------------------------------------------

/// Drive `listener` through one run over recorded snapshots.
///
/// The first snapshot starts the run and the last one ends it; every
/// snapshot, including those two, is reported as a step. `events` pairs a
/// snapshot index with the event observed at that step.
pub fn replay<S: SimulationSnapshot>(
    listener: &mut dyn SimulationListener,
    snapshots: &[S],
    events: &[(usize, FlightEventKind)],
) {
    let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) else {
        return;
    };

    listener.start_simulation(first);
    for (i, s) in snapshots.iter().enumerate() {
        listener.post_step(s);
        for (_, kind) in events.iter().filter(|(idx, _)| *idx == i) {
            listener.handle_flight_event(s, kind);
        }
    }
    listener.end_simulation(last, None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfigBuilder;
    use crate::io::CsvTable;
    use crate::session::SessionState;
    use crate::snapshot::FlightSnapshot;
    use nalgebra::Vector3;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl SimulationListener for Recorder {
        fn start_simulation(&mut self, s: &dyn SimulationSnapshot) {
            self.calls.push(format!("start {}", s.time()));
        }
        fn post_step(&mut self, s: &dyn SimulationSnapshot) {
            self.calls.push(format!("step {}", s.time()));
        }
        fn handle_flight_event(&mut self, _s: &dyn SimulationSnapshot, e: &FlightEventKind) {
            self.calls.push(format!("event {e}"));
        }
        fn end_simulation(&mut self, s: &dyn SimulationSnapshot, _e: Option<&dyn std::error::Error>) {
            self.calls.push(format!("end {}", s.time()));
        }
    }

    fn flight(n: usize) -> Vec<FlightSnapshot> {
        (0..n)
            .map(|i| FlightSnapshot {
                time: i as f64 * 0.5,
                pos: Vector3::new(0.0, 0.0, 10.0 * i as f64),
                ..FlightSnapshot::default()
            })
            .collect()
    }

    #[test]
    fn replay_calls_hooks_in_host_order() {
        let mut rec = Recorder::default();
        replay(&mut rec, &flight(3), &[(1, FlightEventKind::Apogee)]);
        assert_eq!(
            rec.calls,
            vec!["start 0", "step 0", "step 0.5", "event Apogee", "step 1", "end 1"]
        );
    }

    #[test]
    fn replay_of_nothing_does_nothing() {
        let mut rec = Recorder::default();
        replay::<FlightSnapshot>(&mut rec, &[], &[]);
        assert!(rec.calls.is_empty());
        assert_eq!(rec.name(), "unnamed");
    }

    #[test]
    fn inertial_export_as_listener() {
        let dir = tempfile::tempdir().unwrap();
        let mut export = InertialExport::new(ExportConfigBuilder::new().output_dir(dir.path()).build());
        assert_eq!(export.name(), "Inertial Data Export");

        replay(&mut export, &flight(4), &[]);
        assert_eq!(export.state(), SessionState::Idle);

        let table = CsvTable::read_file(dir.path().join("simulation-001.csv")).unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.column("relPosZ"), Some(vec![0.0, 10.0, 20.0, 30.0]));

        let summary = export.last_summary().unwrap();
        assert_eq!(summary.path, dir.path().join("simulation-001.csv"));
        assert_eq!(summary.rows, 4);
        assert!(summary.complete);
    }
}
