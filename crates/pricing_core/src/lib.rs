//! Pricing core: pure price selection, retry decisions and result classification.
mod align;
mod classify;
mod code;
mod quote;
mod record;
mod retry;
mod selection;
mod table;

pub use align::{align_to_codes, dedupe_by_key, find_code_column};
pub use classify::{bucket_for, classify, classify_table, Bucket, ClassificationSet};
pub use code::{normalize_codes, ProductCode};
pub use quote::{PriceQuoteOutcome, QuoteError, NOT_FOUND_NOTE};
pub use record::{ResultRecord, NULL_PRICE};
pub use retry::{RetryDecision, RetryPolicy};
pub use selection::{select_price, Offer, ProductListing};
pub use table::{ResultTable, TableError, CODE_COLUMN, NOTE_COLUMN, PRICE_COLUMN, TITLE_COLUMN};
