//! Value cleaners for the numeric listing columns.
//!
//! Dirty data is expected: a cell that cannot be normalized becomes
//! [`Parsed::Missing`] instead of an error, and the row filter drops it.

use crate::loader::Cell;

/// Currency symbols accepted in front of a revenue figure.
const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£', '¥'];

/// Outcome of normalizing one numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed {
    Parsed(f64),
    Missing,
}

impl Parsed {
    pub fn value(self) -> Option<f64> {
        match self {
            Parsed::Parsed(v) => Some(v),
            Parsed::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Parsed::Missing)
    }

    fn from_str_finite(s: &str, multiplier: f64) -> Self {
        match s.trim().parse::<f64>() {
            Ok(v) if (v * multiplier).is_finite() => Parsed::Parsed(v * multiplier),
            _ => Parsed::Missing,
        }
    }
}

/// Normalizes a revenue cell into base currency units.
///
/// Strips one leading currency symbol and every thousands separator, then
/// honours a trailing `B` (billions) or `M` (millions) suffix in either case.
/// `"€2.3B"` becomes `2.3e9`, `"1,234.5"` becomes `1234.5`.
pub fn clean_revenue(cell: &Cell) -> Parsed {
    let raw = match cell {
        Cell::Null => return Parsed::Missing,
        Cell::Number(v) => return Parsed::Parsed(*v),
        Cell::Text(s) => s,
    };

    let trimmed = raw.trim();
    let unprefixed = trimmed
        .strip_prefix(CURRENCY_SYMBOLS)
        .unwrap_or(trimmed);
    let s = unprefixed.replace(',', "");
    let s = s.trim();

    let (number, multiplier) = if let Some(rest) = s.strip_suffix(['B', 'b']) {
        (rest, 1e9)
    } else if let Some(rest) = s.strip_suffix(['M', 'm']) {
        (rest, 1e6)
    } else {
        (s, 1.0)
    };

    Parsed::from_str_finite(number, multiplier)
}

/// Normalizes a company-size cell: thousands separators only, no suffixes.
pub fn clean_company_size(cell: &Cell) -> Parsed {
    match cell {
        Cell::Null => Parsed::Missing,
        Cell::Number(v) => Parsed::Parsed(*v),
        Cell::Text(s) => Parsed::from_str_finite(&s.replace(',', ""), 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_null_revenue_is_missing() {
        assert_eq!(clean_revenue(&Cell::Null), Parsed::Missing);
    }

    #[test]
    fn test_revenue_with_currency_and_suffix() {
        assert_eq!(clean_revenue(&text("€2.3B")), Parsed::Parsed(2_300_000_000.0));
        assert_eq!(clean_revenue(&text("500M")), Parsed::Parsed(500_000_000.0));
        assert_eq!(clean_revenue(&text("$12M")), Parsed::Parsed(12_000_000.0));
    }

    #[test]
    fn test_revenue_thousands_separator() {
        assert_eq!(clean_revenue(&text("1,234.5")), Parsed::Parsed(1234.5));
        assert_eq!(clean_revenue(&text("€ 1,000,000 ")), Parsed::Parsed(1_000_000.0));
    }

    #[test]
    fn test_suffix_is_case_insensitive() {
        assert_eq!(clean_revenue(&text("4b")), Parsed::Parsed(4_000_000_000.0));
        assert_eq!(clean_revenue(&text("4B")), Parsed::Parsed(4_000_000_000.0));
        assert_eq!(clean_revenue(&text("3m")), clean_revenue(&text("3M")));
    }

    #[test]
    fn test_unparseable_revenue_is_missing() {
        assert_eq!(clean_revenue(&text("abc")), Parsed::Missing);
        assert_eq!(clean_revenue(&text("")), Parsed::Missing);
        assert_eq!(clean_revenue(&text("€")), Parsed::Missing);
        assert_eq!(clean_revenue(&text("1.2.3M")), Parsed::Missing);
        assert_eq!(clean_revenue(&text("B")), Parsed::Missing);
        assert_eq!(clean_revenue(&text("12 employees")), Parsed::Missing);
        assert_eq!(clean_revenue(&text("infB")), Parsed::Missing);
    }

    #[test]
    fn test_numeric_revenue_passes_through() {
        assert_eq!(clean_revenue(&Cell::Number(42.5)), Parsed::Parsed(42.5));
        assert_eq!(clean_revenue(&Cell::Number(0.0)), Parsed::Parsed(0.0));
    }

    #[test]
    fn test_zero_is_not_missing() {
        let parsed = clean_revenue(&text("€0"));
        assert_eq!(parsed, Parsed::Parsed(0.0));
        assert!(!parsed.is_missing());
    }

    #[test]
    fn test_company_size() {
        assert_eq!(clean_company_size(&text("10,000")), Parsed::Parsed(10_000.0));
        assert_eq!(clean_company_size(&Cell::Number(250.0)), Parsed::Parsed(250.0));
        assert_eq!(clean_company_size(&Cell::Null), Parsed::Missing);
        assert_eq!(clean_company_size(&text("1001-5000")), Parsed::Missing);
        assert_eq!(clean_company_size(&text("10K")), Parsed::Missing);
        assert_eq!(clean_company_size(&text("€100")), Parsed::Missing);
    }

    #[test]
    fn test_parsed_value() {
        assert_eq!(Parsed::Parsed(1.5).value(), Some(1.5));
        assert_eq!(Parsed::Missing.value(), None);
    }
}
