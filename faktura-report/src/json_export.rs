//! JSON dump of the whole statement document.

use anyhow::{Context, Result};
use faktura_core::StatementDocument;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_json<W: Write>(doc: &StatementDocument, out: W) -> Result<()> {
    serde_json::to_writer_pretty(out, doc).context("serialize statement")?;
    Ok(())
}

pub fn export_json(doc: &StatementDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_json(doc, &mut out)?;
    out.flush().with_context(|| format!("write {}", path.display()))?;
    tracing::info!("wrote {} card(s) to JSON file '{}'", doc.cards.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faktura_core::Card;

    #[test]
    fn test_json_round_trip() {
        let doc = StatementDocument {
            cards: vec![Card::new("JANE DOE", Some("41005".to_string()))],
            ocr: Some("1234".to_string()),
            page_total: 3,
            ..StatementDocument::new()
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faktura.json");
        export_json(&doc, &path).unwrap();

        let back: StatementDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, doc);
    }
}
