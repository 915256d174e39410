//! Transaction rows.
//!
//! ```text
//! 08.06.21 09.06.21 RESTAURANG PRINSEN STOCKHOLM 1.234,00
//! ^date    ^posted  ^details ............ ^location ^amount
//! ```
//!
//! The location is not a column of its own. It is either the last word of the
//! details or, when the text wrapped, the next line on its own.

use chrono::NaiveDate;
use faktura_core::{parse_amount, parse_statement_date, LocationTable, Transaction, DATE_WIDTH};
use tracing::{debug, warn};

use crate::error::StatementError;

/// A decoded row and how many statement lines it used (1, or 2 when the
/// following line was claimed as its location).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction {
    pub transaction: Transaction,
    pub consumed: usize,
}

/// Transaction and posting date when `line` is a transaction row.
pub fn recognize(line: &str) -> Option<(NaiveDate, NaiveDate)> {
    if line.len() < DATE_WIDTH * 2 {
        return None;
    }
    let date = parse_statement_date(line).ok()?;
    let posting_date = parse_statement_date(line.get(DATE_WIDTH..)?).ok()?;
    Some((date, posting_date))
}

pub struct TransactionParser<'a> {
    locations: &'a LocationTable,
}

impl<'a> TransactionParser<'a> {
    pub fn new(locations: &'a LocationTable) -> Self {
        Self { locations }
    }

    /// Decode a transaction row. `next` is the line after it, if any.
    pub fn parse(&self, line: &str, next: Option<&str>) -> Result<ParsedTransaction, StatementError> {
        let date = parse_statement_date(line)?;
        let posting_date = parse_statement_date(
            line.get(DATE_WIDTH..)
                .ok_or(StatementError::MalformedTransactionLine)?,
        )?;

        let remainder = line
            .get(DATE_WIDTH * 2..)
            .ok_or(StatementError::MalformedTransactionLine)?;
        let (detail_text, amount_token) = remainder
            .rsplit_once(' ')
            .ok_or(StatementError::MalformedTransactionLine)?;

        let amount = parse_amount(amount_token)?;
        let (details, location, consumed) = self.resolve_details(detail_text, next);

        Ok(ParsedTransaction {
            transaction: Transaction {
                date,
                posting_date,
                amount,
                details,
                location,
            },
            consumed,
        })
    }

    /// Split the detail text into (details, location, consumed lines).
    fn resolve_details(&self, text: &str, next: Option<&str>) -> (String, Option<String>, usize) {
        let text = text.trim();

        let claimed = next.and_then(|n| self.locations.resolve(n));
        let consumed = if claimed.is_some() { 2 } else { 1 };

        let tokens: Vec<&str> = text.split(' ').collect();
        if tokens.len() <= 1 {
            warn!("very weird line with no spaces ({text})");
            return (text.to_string(), claimed.map(str::to_string), consumed);
        }

        debug!("remaining line: '{text}' tc={}", tokens.len());
        let last = tokens[tokens.len() - 1];

        let (location, drop_last) = match claimed {
            Some(loc) => (loc, last == loc),
            None => match self.locations.resolve(last) {
                Some(loc) => (loc, true),
                None => return (text.to_string(), None, consumed),
            },
        };

        let kept = if drop_last {
            &tokens[..tokens.len() - 1]
        } else {
            &tokens[..]
        };
        let details = kept
            .iter()
            .filter(|t| !t.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        (details, Some(location.to_string()), consumed)
    }
}
