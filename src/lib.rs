//! Renders a task performance analytics report (JSON) as a five-sheet
//! XLSX dashboard with charts, tables and conditional styling.

pub mod classify;
pub mod error;
pub mod recommend;
pub mod report;
pub mod sheets;
pub mod style;

pub use error::ReportError;
pub use report::Report;
pub use sheets::generate_dashboard;
