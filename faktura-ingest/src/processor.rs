//! Single pass over the reconstructed lines, building the statement document.

use faktura_core::{parse_statement_date, LocationTable, Markers, StatementDocument};
use tracing::{debug, info, warn};

use crate::columns::LineReconstructor;
use crate::error::{LineError, Stage, StatementError};
use crate::session::CardSessionTracker;
use crate::transaction::{recognize, TransactionParser};

pub struct StatementProcessor<'a> {
    markers: &'a Markers,
    parser: TransactionParser<'a>,
    sessions: CardSessionTracker,
    document: StatementDocument,
}

impl<'a> StatementProcessor<'a> {
    pub fn new(markers: &'a Markers, locations: &'a LocationTable) -> Self {
        Self {
            markers,
            parser: TransactionParser::new(locations),
            sessions: CardSessionTracker::new(),
            document: StatementDocument::new(),
        }
    }

    /// Run the pass. The first fatal error aborts it.
    pub fn process(mut self, lines: &[String]) -> Result<StatementDocument, LineError> {
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx].as_str();
            let next = lines.get(idx + 1).map(String::as_str);

            let consumed = self.process_line(line, next).map_err(|e| {
                info!("offending line {}: {line}", idx + 1);
                LineError::new(Stage::Statement, idx + 1, e)
            })?;

            self.document.stats.total_lines += consumed;
            idx += consumed;
        }

        info!("processed {} card(s)", self.document.cards.len());
        Ok(self.document)
    }

    /// Handle one line, returning how many lines it consumed.
    fn process_line(&mut self, line: &str, next: Option<&str>) -> Result<usize, StatementError> {
        if let Some(header) = line.strip_prefix(self.markers.card_begin.as_str()) {
            self.sessions
                .begin(&mut self.document.cards, header, self.markers);
            self.document.stats.marker_lines += 1;
            return Ok(1);
        }

        if line.starts_with(self.markers.card_end.as_str()) {
            let closed = &self.document.cards[self.sessions.end()?];
            info!(
                "closed session for card '{closed}', {} transactions to date",
                closed.transactions.len()
            );
            self.document.stats.marker_lines += 1;
            return Ok(1);
        }

        if recognize(line).is_some() {
            return self.process_transaction(line, next);
        }

        if self.document.ocr.is_none() {
            if let Some(ocr) = line.strip_prefix(self.markers.ocr.as_str()) {
                self.document.ocr = Some(ocr.trim().to_string());
                self.document.stats.marker_lines += 1;
                return Ok(1);
            }
        }

        if let Some(rest) = line.strip_prefix(self.markers.due_date.as_str()) {
            match parse_statement_date(rest.trim()) {
                Ok(date) if self.document.due_date.is_none() => self.document.due_date = Some(date),
                Ok(date) => debug!("ignoring later due date {date}"),
                Err(e) => warn!("could not extract due date: {e}"),
            }
            self.document.stats.marker_lines += 1;
            return Ok(1);
        }

        debug!("discarding unsupported line '{line}'");
        self.document.stats.skipped_lines += 1;
        Ok(1)
    }

    fn process_transaction(&mut self, line: &str, next: Option<&str>) -> Result<usize, StatementError> {
        let Some(active) = self.sessions.active() else {
            warn!("transaction without a current card: '{line}'");
            self.document.stats.orphaned_transactions += 1;
            self.document.stats.skipped_lines += 1;
            return Ok(1);
        };

        let parsed = self.parser.parse(line, next)?;
        let card = &mut self.document.cards[active];
        let t = &parsed.transaction;
        info!(
            "transaction for '{}', location={} on {} for {:.2} SEK, details: '{}'",
            card.holder,
            t.location.as_deref().unwrap_or("unknown"),
            t.date,
            t.amount,
            t.details
        );

        card.transactions.push(parsed.transaction);
        self.document.stats.transaction_count += 1;
        self.document.stats.claimed_lines += parsed.consumed - 1;
        Ok(parsed.consumed)
    }
}

/// Text to document in one call: column reconstruction, then processing.
#[derive(Debug, Clone)]
pub struct StatementParser {
    reconstructor: LineReconstructor,
    markers: Markers,
}

impl StatementParser {
    /// Fails on an unusable split width, before any text is looked at.
    pub fn new(split_width: usize, markers: Markers) -> Result<Self, StatementError> {
        Ok(Self {
            reconstructor: LineReconstructor::new(split_width, &markers)?,
            markers,
        })
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn parse(&self, text: &str, locations: &LocationTable) -> Result<StatementDocument, LineError> {
        let reconstructed = self.reconstructor.reconstruct(text)?;
        let mut document =
            StatementProcessor::new(&self.markers, locations).process(&reconstructed.lines)?;
        document.page_total = reconstructed.page_total;
        Ok(document)
    }
}
