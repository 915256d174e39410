//! Card sessions: the span between "new purchases for <holder>" and
//! "total new purchases for <holder>".

use faktura_core::{Card, Markers};
use tracing::info;

use crate::error::StatementError;

/// Tracks which card new transactions belong to.
///
/// The card registry itself is owned by the caller; the tracker only holds the
/// index of the active card in it.
#[derive(Debug, Default)]
pub struct CardSessionTracker {
    active: Option<usize>,
}

impl CardSessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the card currently receiving transactions.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Open a session from the text following the begin marker.
    ///
    /// Reuses the first registered card matching `(holder, suffix)` (see
    /// [`Card::is_identified_by`]), otherwise registers a new one. Returns the
    /// index of the now active card.
    pub fn begin(&mut self, cards: &mut Vec<Card>, header: &str, markers: &Markers) -> usize {
        let (holder, suffix) = split_holder(header, &markers.supplementary_card);

        let idx = match cards
            .iter()
            .position(|c| c.is_identified_by(holder, suffix))
        {
            Some(idx) => {
                info!("using existing card '{}'", cards[idx]);
                idx
            }
            None => {
                let card = Card::new(holder, suffix.map(str::to_string));
                info!(
                    "allocated new {}card {} for {}",
                    if card.is_supplementary() { "extra " } else { "" },
                    card.suffix.as_deref().unwrap_or(""),
                    card.holder
                );
                cards.push(card);
                cards.len() - 1
            }
        };

        self.active = Some(idx);
        idx
    }

    /// Close the active session, returning the index of the closed card.
    pub fn end(&mut self) -> Result<usize, StatementError> {
        self.active.take().ok_or(StatementError::UnexpectedSessionEnd)
    }
}

/// `JANE DOE Extrakort som slutar på 12345` -> (`JANE DOE`, Some(`12345`))
fn split_holder<'a>(header: &'a str, supplementary: &str) -> (&'a str, Option<&'a str>) {
    match header.find(supplementary) {
        Some(pos) => {
            let suffix = header[pos + supplementary.len()..].trim();
            (header[..pos].trim(), (!suffix.is_empty()).then_some(suffix))
        }
        None => (header.trim(), None),
    }
}
