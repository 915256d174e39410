//! faktura-core: statement model and the leaf parsers for AMEX invoice text

pub mod amount;
pub mod date;
pub mod error;
pub mod location;
pub mod markers;
pub mod statement;

pub use amount::parse_amount;
pub use date::{parse_statement_date, DATE_TOKEN_LEN, DATE_WIDTH};
pub use error::{AmountError, DateError, LocationTableError};
pub use location::LocationTable;
pub use markers::{Locale, Markers};
pub use statement::{Card, Statistics, StatementDocument, Transaction};
