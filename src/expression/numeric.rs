//! Random number expressions.
//!
//! Bounds are inclusive and may be given by name or position:
//! `${RANDOM_INTEGER(min=1, max=6)}` and `${RANDOM_INTEGER(1, 6)}` are the
//! same. Unparsable bounds fall back to the defaults; reversed bounds are
//! swapped.

use rand::Rng;

use super::{Expression, ExpressionInput};

/// Largest accepted `scale` for `RANDOM_DECIMAL`.
pub const MAX_DECIMAL_SCALE: u8 = 10;

const DEFAULT_DECIMAL_SCALE: u8 = 2;

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// `${RANDOM_INTEGER(min, max)}` → 32-bit integer, defaults `0..=i32::MAX`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIntegerExpression;

impl RandomIntegerExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_INTEGER";
}

impl Expression for RandomIntegerExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random 32-bit integer; arguments: min (default 0), max (default 2147483647)"
    }

    fn transform(&self, input: &ExpressionInput) -> String {
        let (min, max) = ordered(
            input.parse_or("min", 0, 0_i32),
            input.parse_or("max", 1, i32::MAX),
        );
        rand::rng().random_range(min..=max).to_string()
    }
}

/// `${RANDOM_LONG(min, max)}` → 64-bit integer, defaults `0..=i64::MAX`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomLongExpression;

impl RandomLongExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_LONG";
}

impl Expression for RandomLongExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random 64-bit integer; arguments: min (default 0), max (default 9223372036854775807)"
    }

    fn transform(&self, input: &ExpressionInput) -> String {
        let (min, max) = ordered(
            input.parse_or("min", 0, 0_i64),
            input.parse_or("max", 1, i64::MAX),
        );
        rand::rng().random_range(min..=max).to_string()
    }
}

/// `${RANDOM_DECIMAL(min, max, scale)}` → fixed-point decimal, defaults
/// `0.0..=1.0` with two fractional digits
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDecimalExpression;

impl RandomDecimalExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_DECIMAL";
}

impl Expression for RandomDecimalExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random decimal; arguments: min (default 0), max (default 1), scale (default 2, max 10)"
    }

    fn transform(&self, input: &ExpressionInput) -> String {
        let finite_or = |value: f64, default: f64| {
            if value.is_finite() { value } else { default }
        };
        let (min, max) = ordered(
            finite_or(input.parse_or("min", 0, 0.0_f64), 0.0),
            finite_or(input.parse_or("max", 1, 1.0_f64), 1.0),
        );
        let scale = input
            .parse_or("scale", 2, DEFAULT_DECIMAL_SCALE)
            .min(MAX_DECIMAL_SCALE);

        let value = if min >= max {
            min
        } else if (max - min).is_finite() {
            rand::rng().random_range(min..=max)
        } else {
            // `rand` rejects spans that overflow f64; step through the midpoint.
            tracing::debug!(min, max, "decimal span overflows, drawing in halves");
            let half = max / 2.0 - min / 2.0;
            let unit: f64 = rand::rng().random();
            unit.mul_add(half, unit.mul_add(half, min)).clamp(min, max)
        };
        format!("{value:.prec$}", prec = usize::from(scale))
    }
}
