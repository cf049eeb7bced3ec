pub mod report;

pub use report::{format_units, ReportGenerator};
