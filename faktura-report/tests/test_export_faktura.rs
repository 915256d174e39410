use faktura_core::{LocationTable, Markers};
use faktura_ingest::{StatementParser, DEFAULT_SPLIT_WIDTH};
use faktura_report::{render_report, write_csv};

const FAKTURA_SV: &str = include_str!("../../faktura-ingest/tests/fixtures/faktura_sv.txt");
const LOCATIONS: &str = include_str!("../../faktura-ingest/tests/fixtures/locations.txt");

fn parse() -> faktura_core::StatementDocument {
    let locations = LocationTable::parse(LOCATIONS).unwrap();
    StatementParser::new(DEFAULT_SPLIT_WIDTH, Markers::swedish())
        .unwrap()
        .parse(FAKTURA_SV, &locations)
        .unwrap()
}

#[test]
fn test_csv_from_real_layout() {
    let mut buf = Vec::new();
    let rows = write_csv(&parse(), &mut buf).unwrap();
    assert_eq!(rows, 5);

    let expected = "\
AMEX KARIN ANDERSSON
Datum;Bokfört;Specifikation;Ort;Valuta;Utl.belopp/moms;Belopp
06-08;06-09;ICA NARA;SOLNA;;;123.45
06-10;06-11;SL ACCESS;STOCKHOLM;;;930.00
06-12;06-14;AMAZON MKTPLACE;NEW YORK;;;1299.50
06-15;06-16;SPOTIFY;unknown;;;99.00

AMEX KARIN ANDERSSON-72001
Datum;Bokfört;Specifikation;Ort;Valuta;Utl.belopp/moms;Belopp
06-20;06-21;PRESSBYRAN? T-CENTRALEN;STOCKHOLM;;;45.00

";
    assert_eq!(String::from_utf8(buf).unwrap(), expected);
}

#[test]
fn test_report_from_real_layout() {
    let report = render_report(&parse()).unwrap();
    assert!(report.contains("Total purchases for KARIN ANDERSSON: 2451.95 SEK"));
    assert!(report.contains("Total purchases for KARIN ANDERSSON-72001: 45.00 SEK"));
    assert!(report.contains("Total for all cards: 2496.95 SEK"));
    assert!(report.contains("Faktura due date: 2021-06-30"));
    assert!(report.contains("Faktura OCR: 12345678901234"));
}
