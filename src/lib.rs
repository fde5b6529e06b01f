//! Run statistics from MinKNOW HTML run reports.

pub mod convert;
pub mod error;
pub mod layout;
pub mod model;
pub mod output;
pub mod parser;
pub mod settings;

pub use error::{ReportError, Result, Stage};
pub use model::{BarcodeRecord, Event, EventLogRecord, FieldMap, RunReport, StatsRecord};
pub use parser::{parse_report, read_report, ExtractOptions};
