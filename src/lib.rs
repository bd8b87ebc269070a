pub mod snapshot;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod io;
pub mod notify;
pub mod session;
pub mod listener;

pub use catalog::{FieldCatalog, FieldDescriptor, FIELDS};
pub use config::{ExportConfig, ExportConfigBuilder};
pub use error::{ExportError, ExportResult};
pub use event::FlightEventKind;
pub use listener::{replay, ExtensionInfo, SimulationListener};
pub use notify::{LogNotifier, Notifier};
pub use session::{InertialExport, SessionState, SessionSummary};
pub use snapshot::{BodyRates, FlightSnapshot, GeodeticPosition, SimulationSnapshot};
