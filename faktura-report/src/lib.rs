//! faktura-report: plain-text report, CSV and JSON export of a parsed invoice

pub mod csv_export;
pub mod json_export;
pub mod text_report;

pub use csv_export::{export_csv, write_csv, CSV_HEADER};
pub use json_export::{export_json, write_json};
pub use text_report::{render_report, write_report};
