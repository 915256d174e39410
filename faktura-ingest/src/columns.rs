//! Undo the two-column page layout of the extracted invoice text.
//!
//! Every printed page has a left and a right column. Text extraction keeps them
//! side by side on the same physical line:
//!
//! ```text
//! Nya köp för JANE DOE                     |OCR: 1234567890
//! 08.06.21 09.06.21 ICA NARA SOLNA 123,00  |Förfallodag 30.06.21
//! ```
//!
//! Lines are cut at a fixed character width and, per page, all left-column
//! lines are emitted before the right-column lines.

use faktura_core::Markers;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{LineError, Stage, StatementError};

pub const DEFAULT_SPLIT_WIDTH: usize = 80;
pub const MIN_SPLIT_WIDTH: usize = 10;

/// Logical lines in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstructed {
    pub lines: Vec<String>,
    pub page_total: u32,
}

#[derive(Debug, Clone)]
pub struct LineReconstructor {
    split_width: usize,
    page_prefix: String,
    page_re: Regex,
}

impl LineReconstructor {
    pub fn new(split_width: usize, markers: &Markers) -> Result<Self, StatementError> {
        if split_width < MIN_SPLIT_WIDTH {
            return Err(StatementError::InvalidSplitWidth {
                width: split_width,
                min: MIN_SPLIT_WIDTH,
            });
        }

        // Whitespace around the numbers is optional, as with scanf.
        let page_re = Regex::new(&format!(
            r"^{}\s*(\d+)\s*{}\s*(\d+)",
            regex::escape(markers.page_prefix.trim_end()),
            regex::escape(markers.page_separator.trim()),
        ))?;

        Ok(Self {
            split_width,
            page_prefix: markers.page_prefix.clone(),
            page_re,
        })
    }

    pub fn split_width(&self) -> usize {
        self.split_width
    }

    pub fn reconstruct(&self, text: &str) -> Result<Reconstructed, LineError> {
        let mut lines = Vec::new();
        let mut left: Vec<String> = Vec::new();
        let mut right: Vec<String> = Vec::new();
        let mut page_total: Option<u32> = None;
        let mut last_page = 0;
        let mut line_count = 0;

        for (i, raw) in text.lines().enumerate() {
            line_count = i + 1;

            if let Some(pos) = raw.find(&self.page_prefix) {
                let (page, total) = self
                    .parse_page_marker(&raw[pos..])
                    .map_err(|e| LineError::new(Stage::Input, i + 1, e))?;

                if page > 1 && page != last_page {
                    flush_columns(&mut lines, &mut left, &mut right);
                    last_page = page;
                }
                info!("processing page {page} of {total}");
                page_total = Some(total);
                continue;
            }

            if page_total.is_none() {
                // Cover letter and address block before the first page marker
                continue;
            }

            let (lhs, rhs) = self.split_columns(raw);
            left.extend(lhs);
            right.extend(rhs);
        }

        let Some(page_total) = page_total else {
            // Empty input still points at line 1
            return Err(LineError::new(
                Stage::Input,
                line_count.max(1),
                StatementError::NotAStatement,
            ));
        };

        flush_columns(&mut lines, &mut left, &mut right);
        info!(
            "read {} input line(s), {page_total} page(s), kept {} line(s)",
            line_count,
            lines.len()
        );

        Ok(Reconstructed { lines, page_total })
    }

    /// Split one physical line into its trimmed left and right column text.
    ///
    /// The character at `split_width - 1` is the gutter between the columns and
    /// belongs to neither. `;` is replaced by `?` since it separates CSV fields.
    pub fn split_columns(&self, raw: &str) -> (Option<String>, Option<String>) {
        let line = raw.replace(';', "?");
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };

        match line.char_indices().nth(self.split_width - 1) {
            Some((gutter, ch)) => (
                non_empty(&line[..gutter]),
                non_empty(&line[gutter + ch.len_utf8()..]),
            ),
            None => (non_empty(&line), None),
        }
    }

    fn parse_page_marker(&self, marker: &str) -> Result<(u32, u32), StatementError> {
        let invalid = || StatementError::PageMarkerParseError(marker.trim().to_string());
        let caps = self.page_re.captures(marker).ok_or_else(invalid)?;
        let page = caps[1].parse().map_err(|_| invalid())?;
        let total = caps[2].parse().map_err(|_| invalid())?;
        Ok((page, total))
    }
}

fn flush_columns(lines: &mut Vec<String>, left: &mut Vec<String>, right: &mut Vec<String>) {
    debug!("[LHS] added {} entries", left.len());
    lines.append(left);
    debug!("[RHS] added {} entries", right.len());
    lines.append(right);
}
