pub mod csv;
pub mod naming;

pub use csv::{format_row, CsvTable};
pub use naming::create_next;
