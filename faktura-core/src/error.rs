//! Errors raised by the leaf parsers.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date format `{0}` (expected DD.MM.YY)")]
    InvalidDateFormat(String),
    #[error("{day:02}.{month:02}.{year} is not a calendar date")]
    InvalidDate { day: u32, month: u32, year: i32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("value `{0}` is malformed")]
    MalformedAmount(String),
    #[error("invalid character {ch:?} in value `{input}`")]
    InvalidAmountChar { ch: char, input: String },
    #[error("could not convert amount `{0}` to a number")]
    AmountParseFailure(String),
    #[error("got garbage `{rest}` after amount `{amount}`")]
    TrailingGarbage { amount: String, rest: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationTableError {
    #[error("L{line}: invalid location map entry `{content}`")]
    InvalidMapEntry { line: usize, content: String },
    #[error("L{line}: invalid location `{content}`")]
    InvalidLocation { line: usize, content: String },
}
