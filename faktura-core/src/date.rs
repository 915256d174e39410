//! Statement dates.
//!
//! AMEX invoices print dates as `DD.MM.YY`. Transaction rows carry two of them
//! back to back, each followed by a single space:
//!
//! ```text
//! 08.06.21 09.06.21 ICA NARA SOLNA 123,00
//! ```

use chrono::NaiveDate;

use crate::error::DateError;

/// Characters in a `DD.MM.YY` token.
pub const DATE_TOKEN_LEN: usize = 8;

/// Width of one date column on a transaction row (token plus separator).
pub const DATE_WIDTH: usize = DATE_TOKEN_LEN + 1;

/// Two-digit years are always in this century.
pub const CENTURY_OFFSET: i32 = 2000;

/// Parse the `DD.MM.YY` token at the start of `token`.
///
/// Only the first [`DATE_TOKEN_LEN`] characters are looked at, so the token can
/// be sliced straight out of a longer line.
pub fn parse_statement_date(token: &str) -> Result<NaiveDate, DateError> {
    let invalid = || DateError::InvalidDateFormat(token.chars().take(DATE_TOKEN_LEN).collect());

    let raw = token.get(..DATE_TOKEN_LEN).ok_or_else(invalid)?.as_bytes();
    if raw[2] != b'.' || raw[5] != b'.' {
        return Err(invalid());
    }

    let two_digits = |at: usize| -> Option<u32> {
        let (hi, lo) = (raw[at], raw[at + 1]);
        if hi.is_ascii_digit() && lo.is_ascii_digit() {
            Some(u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
        } else {
            None
        }
    };

    let day = two_digits(0).ok_or_else(invalid)?;
    let month = two_digits(3).ok_or_else(invalid)?;
    let year = CENTURY_OFFSET + two_digits(6).ok_or_else(invalid)? as i32;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::InvalidDate { day, month, year })
}
