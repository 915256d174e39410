//! faktura-ingest: turn extracted AMEX invoice text into a statement document.

pub mod columns;
pub mod error;
pub mod processor;
pub mod session;
pub mod transaction;

pub use columns::{LineReconstructor, Reconstructed, DEFAULT_SPLIT_WIDTH, MIN_SPLIT_WIDTH};
pub use error::{LineError, Stage, StatementError};
pub use processor::{StatementParser, StatementProcessor};
pub use session::CardSessionTracker;
pub use transaction::{recognize, ParsedTransaction, TransactionParser};
