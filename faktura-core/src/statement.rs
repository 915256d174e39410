//! Parsed invoice: cards, their transactions, and run statistics

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One purchase or credit line from the invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Date of purchase
    pub date: NaiveDate,
    /// Date the issuer booked it
    pub posting_date: NaiveDate,
    /// Negative = credit/refund
    pub amount: Decimal,
    pub details: String,
    /// Canonical location, if one could be resolved
    pub location: Option<String>,
}

/// A card holder's session on the invoice. Supplementary cards carry the
/// trailing digits printed on the invoice as `suffix`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub holder: String,
    pub suffix: Option<String>,
    pub transactions: Vec<Transaction>,
}

impl Card {
    pub fn new(holder: impl Into<String>, suffix: Option<String>) -> Self {
        Self {
            holder: holder.into(),
            suffix,
            transactions: Vec::new(),
        }
    }

    /// Whether a begin marker for `(holder, suffix)` selects this card.
    ///
    /// A suffix only matches the same suffix, but a lookup without one takes
    /// any card of the holder, supplementary or not.
    pub fn is_identified_by(&self, holder: &str, suffix: Option<&str>) -> bool {
        self.holder == holder && (suffix.is_none() || self.suffix.as_deref() == suffix)
    }

    pub fn is_supplementary(&self) -> bool {
        self.suffix.is_some()
    }

    /// `holder` or `holder-suffix`
    pub fn label(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}-{}", self.holder, suffix),
            None => self.holder.clone(),
        }
    }

    pub fn total(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Counters kept during a single processing pass.
///
/// Every line lands in exactly one bucket, so
/// `total_lines == skipped_lines + transaction_count + marker_lines + claimed_lines`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    pub total_lines: usize,
    pub skipped_lines: usize,
    pub transaction_count: usize,
    /// Card begin/end, OCR and due-date lines
    pub marker_lines: usize,
    /// Location lines consumed by the transaction above them
    pub claimed_lines: usize,
    /// Transaction lines seen outside a card session (also in `skipped_lines`)
    pub orphaned_transactions: usize,
}

impl Statistics {
    /// Lines attributed to some bucket; equals `total_lines` after a run.
    pub fn accounted_lines(&self) -> usize {
        self.skipped_lines + self.transaction_count + self.marker_lines + self.claimed_lines
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementDocument {
    pub cards: Vec<Card>,
    /// OCR payment reference, first one wins
    pub ocr: Option<String>,
    /// First due date that parsed
    pub due_date: Option<NaiveDate>,
    /// Page count from the page markers
    pub page_total: u32,
    pub stats: Statistics,
}

impl StatementDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Decimal {
        self.cards.iter().map(Card::total).sum()
    }

    pub fn transactions(&self) -> impl Iterator<Item = (&Card, &Transaction)> {
        self.cards
            .iter()
            .flat_map(|c| c.transactions.iter().map(move |t| (c, t)))
    }
}
