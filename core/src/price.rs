//! Price representation and formatting.
//!
//! Prices arrive as an integer numerator over an implied power-of-ten
//! denominator (`10_000` short, `10_000_000` long). Rather than going
//! through `f64` — which would reintroduce the source's float-string
//! formatting quirks without actually needing them, since the denominator
//! is always an exact power of ten — formatting is done directly off the
//! integer numerator. This is behaviorally equivalent to the source for
//! every representable price (a terminating decimal) and sidesteps any
//! float round-trip ambiguity.

/// A decoded price: `numerator / 10^denom_digits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub numerator: i64,
    pub denom_digits: u32,
}

impl Price {
    pub fn new(numerator: i64, denom_digits: u32) -> Self {
        Price { numerator, denom_digits }
    }

    fn scale(&self) -> i64 {
        10i64.pow(self.denom_digits)
    }

    /// `floor(price * volume)`, truncated toward zero like the source's
    /// `int(price * volume)`. Can be negative when `volume` is negative,
    /// which the AMEND-for-price path preserves on purpose.
    pub fn value_for(&self, volume: i64) -> i64 {
        (self.numerator * volume) / self.scale()
    }

    /// Renders the price with a decimal point, padding to two fractional
    /// digits only when the natural (trailing-zero-trimmed) representation
    /// has exactly one digit after the point.
    pub fn display_string(&self) -> String {
        let scale = self.scale();
        let int_part = self.numerator / scale;
        let frac = self.numerator % scale;
        let width = self.denom_digits as usize;
        let padded = format!("{frac:0width$}");
        let trimmed = padded.trim_end_matches('0');
        let frac_str = if trimmed.is_empty() { "0" } else { trimmed };
        if frac_str.len() == 1 {
            format!("{int_part}.{frac_str}0")
        } else {
            format!("{int_part}.{frac_str}")
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_string())
    }
}
