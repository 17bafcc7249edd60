//! Locale-aware currency rendering.
//!
//! The store sells in Argentine pesos and displays amounts the way `es-AR`
//! does: `$ 1.234,50`. The format is described by a [`CurrencyFormat`] value
//! so the separators are visible in one place.

use rust_decimal::{Decimal, RoundingStrategy};

/// Symbol placement and separators for a currency display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Currency symbol written before the amount.
    pub symbol: &'static str,
    /// Text between the symbol and the digits.
    pub symbol_spacing: &'static str,
    /// Thousands grouping separator.
    pub grouping: char,
    /// Decimal separator.
    pub decimal: char,
    /// Number of fraction digits always shown.
    pub fraction_digits: u32,
}

/// Argentine pesos in the `es-AR` locale.
pub const ES_AR: CurrencyFormat = CurrencyFormat {
    symbol: "$",
    symbol_spacing: " ",
    grouping: '.',
    decimal: ',',
    fraction_digits: 2,
};

impl CurrencyFormat {
    /// Render `amount` in this format.
    ///
    /// Rounds half away from zero to `fraction_digits`. Negative amounts get a
    /// leading `-` before the symbol; amounts that round to zero never do.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded < Decimal::ZERO;

        let plain = format!("{:.*}", self.fraction_digits as usize, rounded.abs());
        let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

        let mut out = String::with_capacity(plain.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(self.symbol);
        out.push_str(self.symbol_spacing);
        push_grouped(&mut out, integer, self.grouping);
        if !fraction.is_empty() {
            out.push(self.decimal);
            out.push_str(fraction);
        }
        out
    }
}

/// Append `digits` with `separator` between each group of three, from the right.
fn push_grouped(out: &mut String, digits: &str, separator: char) {
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
}

/// Render `amount` in the store's currency format ([`ES_AR`]).
///
/// ```
/// use almacency_core::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::from(100)), "$ 100,00");
/// assert_eq!(format_currency(Decimal::new(123_450, 2)), "$ 1.234,50");
/// ```
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    ES_AR.format(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_currency(Decimal::from(100)), "$ 100,00");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_currency(Decimal::ZERO), "$ 0,00");
    }

    #[test]
    fn test_format_grouping() {
        assert_eq!(format_currency(Decimal::from(1_000)), "$ 1.000,00");
        assert_eq!(format_currency(Decimal::from(999)), "$ 999,00");
        assert_eq!(format_currency(Decimal::from(1_234_567)), "$ 1.234.567,00");
    }

    #[test]
    fn test_format_pads_fraction() {
        assert_eq!(format_currency(Decimal::new(15, 1)), "$ 1,50");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_currency(Decimal::new(1005, 3)), "$ 1,01");
        assert_eq!(format_currency(Decimal::new(1004, 3)), "$ 1,00");
        assert_eq!(format_currency(Decimal::new(-1005, 3)), "-$ 1,01");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(Decimal::from(-1_500)), "-$ 1.500,00");
    }

    #[test]
    fn test_format_tiny_negative_rounds_to_unsigned_zero() {
        assert_eq!(format_currency(Decimal::new(-1, 3)), "$ 0,00");
    }

    #[test]
    fn test_custom_format() {
        let usd = CurrencyFormat {
            symbol: "US$",
            symbol_spacing: "",
            grouping: ',',
            decimal: '.',
            fraction_digits: 2,
        };
        assert_eq!(usd.format(Decimal::new(123_456, 2)), "US$1,234.56");
    }
}
