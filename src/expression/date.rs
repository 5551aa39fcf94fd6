//! Random date and time expressions.
//!
//! All three draw an instant uniformly from `[now - RANGE, now + RANGE]`
//! (about 31.7 years either side) and differ only in output format.
//! Formatting goes through chrono per call; no formatter is shared.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::{Expression, ExpressionInput};

/// Half-width of the draw window in milliseconds.
pub const RANGE_MILLIS: i64 = 1_000_000_000_000;

/// `yyyy-MM-dd`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `yyyy-MM-ddTHH:mm:ss`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Draws an instant uniformly from `[now - RANGE_MILLIS, now + RANGE_MILLIS]`.
///
/// The window is symmetric. Pre-1970 draws are kept as drawn, not folded
/// forward through `abs()`.
pub fn draw_instant<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> DateTime<Utc> {
    let offset = rng.random_range(-RANGE_MILLIS..=RANGE_MILLIS);
    now.checked_add_signed(Duration::milliseconds(offset))
        .unwrap_or(now)
}

fn random_instant() -> DateTime<Utc> {
    draw_instant(Utc::now(), &mut rand::rng())
}

/// `${RANDOM_DATE}` → `2031-04-17`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDateExpression;

impl RandomDateExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_DATE";
}

impl Expression for RandomDateExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random calendar date (yyyy-MM-dd) within ~31 years of today"
    }

    fn transform(&self, _input: &ExpressionInput) -> String {
        random_instant().format(DATE_FORMAT).to_string()
    }
}

/// `${RANDOM_DATE_TIME}` → `2031-04-17T08:12:55`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDateTimeExpression;

impl RandomDateTimeExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_DATE_TIME";
}

impl Expression for RandomDateTimeExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random UTC date and time (yyyy-MM-ddTHH:mm:ss)"
    }

    fn transform(&self, _input: &ExpressionInput) -> String {
        random_instant().format(DATE_TIME_FORMAT).to_string()
    }
}

/// `${RANDOM_TIMESTAMP}` → `1949830375123` (epoch milliseconds)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTimestampExpression;

impl RandomTimestampExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_TIMESTAMP";
}

impl Expression for RandomTimestampExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random Unix timestamp in milliseconds"
    }

    fn transform(&self, _input: &ExpressionInput) -> String {
        random_instant().timestamp_millis().to_string()
    }
}
