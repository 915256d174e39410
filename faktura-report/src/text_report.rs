//! Plain-text summary of a parsed invoice.

use anyhow::Result;
use faktura_core::StatementDocument;
use std::io::Write;

const THIN_RULE: &str = "----------------------------------------------------------------------";
const CARD_RULE: &str = "-------------------------------------------------------------------------------------------------------------";
const TOTAL_RULE: &str = "=============================================================================================================";

pub fn write_report<W: Write>(doc: &StatementDocument, out: &mut W) -> Result<()> {
    writeln!(out, "{THIN_RULE}")?;
    writeln!(out, " Total cards: {:03}", doc.cards.len())?;
    writeln!(out, "{THIN_RULE}")?;

    for (i, card) in doc.cards.iter().enumerate() {
        writeln!(out, "Card {i:03}: {card}")?;
        writeln!(out, "{CARD_RULE}")?;

        if card.transactions.is_empty() {
            writeln!(out, "No transactions for card\n")?;
            continue;
        }

        for t in &card.transactions {
            let value = format!("{:.2} kr", t.amount);
            writeln!(
                out,
                "{:<10} {:<10} {:<40} {:<30} {:<20}",
                t.date.format("%F").to_string(),
                t.posting_date.format("%F").to_string(),
                t.details,
                t.location.as_deref().unwrap_or("Unknown"),
                value
            )?;
        }

        writeln!(out, "{TOTAL_RULE}")?;
        writeln!(out, "Total purchases for {card}: {:.2} SEK", card.total())?;
        writeln!(out, "{TOTAL_RULE}\n")?;
    }

    let due = doc
        .due_date
        .map(|d| d.format("%F").to_string())
        .unwrap_or_else(|| "(unknown)".to_string());

    writeln!(out, "Total for all cards: {:.2} SEK", doc.total())?;
    writeln!(out, "   Faktura due date: {due}")?;
    writeln!(out, "        Faktura OCR: {}\n", doc.ocr.as_deref().unwrap_or("(unknown)"))?;
    Ok(())
}

pub fn render_report(doc: &StatementDocument) -> Result<String> {
    let mut buf = Vec::new();
    write_report(doc, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
