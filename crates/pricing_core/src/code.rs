use std::fmt;

/// Normalized product identifier (JAN/EAN style codes and friends).
///
/// Always non-empty, trimmed and ASCII-uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductCode(String);

impl ProductCode {
    /// Normalizes a raw input cell. Returns `None` for blank cells and the
    /// textual `nan` that spreadsheet exports leave in empty rows.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return None;
        }
        Some(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes an ordered list of raw cells, dropping blank entries.
/// Input order is preserved and repeated codes are kept.
pub fn normalize_codes<I, S>(raw: I) -> Vec<ProductCode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|cell| ProductCode::parse(cell.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_uppercases() {
        let code = ProductCode::parse("  b00abc123x \t").unwrap();
        assert_eq!(code.as_str(), "B00ABC123X");
    }

    #[test]
    fn blank_and_nan_are_skipped() {
        assert!(ProductCode::parse("").is_none());
        assert!(ProductCode::parse("   ").is_none());
        assert!(ProductCode::parse("NaN").is_none());
    }

    #[test]
    fn normalize_keeps_order_and_duplicates() {
        let codes = normalize_codes(["2", "", "1", "nan", " 2 "]);
        let plain: Vec<_> = codes.iter().map(ProductCode::as_str).collect();
        assert_eq!(plain, vec!["2", "1", "2"]);
    }
}
