//! CSV export, one block per card:
//!
//! ```text
//! AMEX KARIN ANDERSSON
//! Datum;Bokfört;Specifikation;Ort;Valuta;Utl.belopp/moms;Belopp
//! 06-08;06-09;ICA NARA;SOLNA;;;123.45
//!
//! ```

use anyhow::{Context, Result};
use faktura_core::StatementDocument;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: [&str; 7] = [
    "Datum",
    "Bokfört",
    "Specifikation",
    "Ort",
    "Valuta",
    "Utl.belopp/moms",
    "Belopp",
];

/// Write all cards as CSV blocks. Returns the number of transaction rows.
pub fn write_csv<W: Write>(doc: &StatementDocument, out: W) -> Result<usize> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(b';')
        .flexible(true)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'));
    let mut wtr = builder.from_writer(out);

    let mut rows = 0;
    for card in &doc.cards {
        wtr.write_record([format!("AMEX {card}")])?;
        wtr.write_record(CSV_HEADER)?;

        for t in &card.transactions {
            wtr.write_record([
                t.date.format("%m-%d").to_string(),
                t.posting_date.format("%m-%d").to_string(),
                t.details.clone(),
                t.location.clone().unwrap_or_else(|| "unknown".to_string()),
                String::new(),
                String::new(),
                format!("{:.2}", t.amount),
            ])?;
            rows += 1;
        }

        // Blank separator line between cards
        let mut inner = wtr.into_inner().map_err(|e| e.into_error())?;
        inner.write_all(b"\n")?;
        wtr = builder.from_writer(inner);
    }

    wtr.flush()?;
    Ok(rows)
}

pub fn export_csv(doc: &StatementDocument, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let rows = write_csv(doc, file).with_context(|| format!("write {}", path.display()))?;
    tracing::info!("wrote {rows} transaction(s) to CSV file '{}'", path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use faktura_core::{Card, Transaction};
    use rust_decimal::Decimal;

    fn doc() -> StatementDocument {
        let d = |day| NaiveDate::from_ymd_opt(2021, 6, day).unwrap();
        let mut main = Card::new("JANE DOE", None);
        main.transactions.push(Transaction {
            date: d(8),
            posting_date: d(9),
            amount: Decimal::new(12345, 2),
            details: "ICA NARA".to_string(),
            location: Some("SOLNA".to_string()),
        });
        main.transactions.push(Transaction {
            date: d(10),
            posting_date: d(12),
            amount: Decimal::new(-50, 0),
            details: "RETUR \"KLADER\"".to_string(),
            location: None,
        });
        let extra = Card::new("JANE DOE", Some("41005".to_string()));

        StatementDocument {
            cards: vec![main, extra],
            ..StatementDocument::new()
        }
    }

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        let rows = write_csv(&doc(), &mut buf).unwrap();
        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "AMEX JANE DOE\n\
             Datum;Bokfört;Specifikation;Ort;Valuta;Utl.belopp/moms;Belopp\n\
             06-08;06-09;ICA NARA;SOLNA;;;123.45\n\
             06-10;06-12;RETUR \"KLADER\";unknown;;;-50.00\n\
             \n\
             AMEX JANE DOE-41005\n\
             Datum;Bokfört;Specifikation;Ort;Valuta;Utl.belopp/moms;Belopp\n\
             \n"
        );
    }

    #[test]
    fn test_empty_document_writes_nothing() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&StatementDocument::new(), &mut buf).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faktura.csv");
        assert_eq!(export_csv(&doc(), &path).unwrap(), 2);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("AMEX JANE DOE\n"));
        assert!(written.ends_with("\n\n"));
    }
}
