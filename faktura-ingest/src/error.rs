use faktura_core::{AmountError, DateError};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("invalid line split width {width} (minimum is {min})")]
    InvalidSplitWidth { width: usize, min: usize },
    #[error("could not build page marker pattern")]
    MarkerPattern(#[from] regex::Error),
    #[error("could not parse page marker `{0}`")]
    PageMarkerParseError(String),
    #[error("could not find page identifier (is this an AMEX invoice?)")]
    NotAStatement,
    #[error("got card end, but no current card")]
    UnexpectedSessionEnd,
    #[error("malformed line, missing amount separator")]
    MalformedTransactionLine,
    #[error("transaction date")]
    Date(#[from] DateError),
    #[error("process amount")]
    Amount(#[from] AmountError),
}

/// Which line sequence a [`LineError`] index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Raw lines of the input text
    Input,
    /// Lines after column reconstruction
    Statement,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Input => f.write_str("input"),
            Stage::Statement => f.write_str("statement"),
        }
    }
}

/// A fatal error pinned to the 1-based line that caused it.
#[derive(Debug, Error)]
#[error("{stage} line {line}")]
pub struct LineError {
    pub stage: Stage,
    pub line: usize,
    #[source]
    pub source: StatementError,
}

impl LineError {
    pub fn new(stage: Stage, line: usize, source: StatementError) -> Self {
        Self { stage, line, source }
    }
}
