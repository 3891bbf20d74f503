use crate::{PriceQuoteOutcome, ProductCode};

/// Text written in the price column when no price was resolved.
pub const NULL_PRICE: &str = "Null";

/// Per-item outcome as persisted to the output tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub code: ProductCode,
    pub price_minor: Option<i64>,
    pub title: String,
    pub note: String,
}

impl ResultRecord {
    pub fn from_outcome(code: ProductCode, outcome: &PriceQuoteOutcome) -> Self {
        Self {
            code,
            price_minor: outcome.price_minor,
            title: outcome.title.clone().unwrap_or_default(),
            note: outcome
                .error
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }

    pub fn price_text(&self) -> String {
        match self.price_minor {
            Some(price) => price.to_string(),
            None => NULL_PRICE.to_string(),
        }
    }

    /// Cells in output column order: code, price, title, note.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.code.to_string(),
            self.price_text(),
            self.title.clone(),
            self.note.clone(),
        ]
    }
}
