//! Decimal-to-fraction conversion for ingredient quantities.
//!
//! Quantities come back from servings rescaling as decimals like `0.3333`;
//! recipe views want `1/3`. The conversion walks the continued-fraction
//! expansion of the decimal, keeping the convergent `h/k` that lands within
//! tolerance, then reduces it to lowest terms.

use std::fmt;

const TOLERANCE: f64 = 1.0e-6;

// The expansion has no natural stopping point for decimals that never land
// within tolerance (floating-point noise), so cap the convergent walk.
const MAX_ITERATIONS: u32 = 64;

/// A reduced fraction `numerator/denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        let mut fraction = Self {
            numerator,
            denominator,
        };
        fraction.simplify();
        fraction
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    fn simplify(&mut self) {
        let divisor = gcd(self.numerator, self.denominator);
        if divisor != 0 {
            self.numerator /= divisor;
            self.denominator /= divisor;
        }
    }

    /// Best rational approximation of `decimal` by continued-fraction
    /// convergents, within a relative tolerance of 1e-6.
    ///
    /// Intended for positive quantities; iteration is capped, and past the
    /// cap the last convergent is returned as a best effort.
    pub fn from_decimal(decimal: f64) -> Self {
        let mut h1: i64 = 1;
        let mut h2: i64 = 0;
        let mut k1: i64 = 0;
        let mut k2: i64 = 1;
        let mut b = decimal;

        for _ in 0..MAX_ITERATIONS {
            let a = b.floor();
            (h1, h2) = (a as i64 * h1 + h2, h1);
            (k1, k2) = (a as i64 * k1 + k2, k1);

            if k1 != 0 && (decimal - h1 as f64 / k1 as f64).abs() <= decimal * TOLERANCE {
                break;
            }

            let remainder = b - a;
            if remainder == 0.0 {
                break;
            }
            b = 1.0 / remainder;
        }

        Self::new(h1, k1)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Formats an ingredient quantity the way recipe views display it: small
/// non-integer quantities become fractions, everything else a plain number,
/// a missing quantity an empty string.
pub fn format_quantity(quantity: Option<f64>) -> String {
    match quantity {
        None => String::new(),
        Some(q) if q == 0.0 => String::new(),
        Some(q) if q % 1.0 != 0.0 && q > 0.0 && q <= 10.0 => Fraction::from_decimal(q).to_string(),
        Some(q) => format!("{q}"),
    }
}
