//! Marker strings that structure an invoice.
//!
//! The invoices this tool was written for are Swedish, so that preset is the
//! default. Every string can be overridden from the config file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Sv,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// `Sida 1 av 3`: text before the page number.
    pub page_prefix: String,
    /// `Sida 1 av 3`: text between page number and page count.
    pub page_separator: String,
    pub card_begin: String,
    pub card_end: String,
    pub supplementary_card: String,
    pub ocr: String,
    pub due_date: String,
}

impl Markers {
    pub fn swedish() -> Self {
        Self {
            page_prefix: "Sida ".to_string(),
            page_separator: " av ".to_string(),
            card_begin: "Nya köp för ".to_string(),
            card_end: "Summa nya köp för ".to_string(),
            supplementary_card: "Extrakort som slutar på ".to_string(),
            ocr: "OCR: ".to_string(),
            due_date: "Förfallodag".to_string(),
        }
    }

    pub fn english() -> Self {
        Self {
            page_prefix: "Page ".to_string(),
            page_separator: " of ".to_string(),
            card_begin: "New purchases for ".to_string(),
            card_end: "Total new purchases for ".to_string(),
            supplementary_card: "Supplementary card ending in ".to_string(),
            ocr: "OCR: ".to_string(),
            due_date: "Due date".to_string(),
        }
    }

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Sv => Self::swedish(),
            Locale::En => Self::english(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::swedish()
    }
}
