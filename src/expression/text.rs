//! Random text expressions.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::{Expression, ExpressionArgument, ExpressionInput};

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const PASSWORD_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&*+-=?@^_";

const LOWER_ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Reserved documentation domains (RFC 2606), so generated addresses never
/// route anywhere real.
const EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.org", "example.net"];

const DEFAULT_STRING_LENGTH: usize = 10;
const DEFAULT_PASSWORD_LENGTH: usize = 16;
const EMAIL_LOCAL_LENGTH: usize = 10;

fn sample(charset: &[u8], len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(charset[rng.random_range(0..charset.len())]))
        .collect()
}

fn capped_length(input: &ExpressionInput, default: usize, max: usize) -> usize {
    let requested = input.parse_or("length", 0, default);
    if requested > max {
        tracing::debug!(
            expression = input.identifier(),
            requested,
            max,
            "length exceeds limit, clamping"
        );
    }
    requested.min(max)
}

/// `${RANDOM_STRING(length)}` → alphanumeric string, default length 10
#[derive(Debug, Clone, Copy)]
pub struct RandomStringExpression {
    max_length: usize,
}

impl RandomStringExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_STRING";

    /// Creates the expression with an upper bound on `length`.
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Expression for RandomStringExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random alphanumeric string; arguments: length (default 10)"
    }

    fn transform(&self, input: &ExpressionInput) -> String {
        let len = capped_length(input, DEFAULT_STRING_LENGTH, self.max_length);
        sample(ALPHANUMERIC, len)
    }
}

/// `${RANDOM_PASSWORD(length)}` → letters, digits and symbols, default
/// length 16
#[derive(Debug, Clone, Copy)]
pub struct RandomPasswordExpression {
    max_length: usize,
}

impl RandomPasswordExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_PASSWORD";

    /// Creates the expression with an upper bound on `length`.
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Expression for RandomPasswordExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random password of letters, digits and symbols; arguments: length (default 16)"
    }

    fn transform(&self, input: &ExpressionInput) -> String {
        let len = capped_length(input, DEFAULT_PASSWORD_LENGTH, self.max_length);
        sample(PASSWORD_CHARS, len)
    }
}

/// `${RANDOM_EMAIL}` → `k2x9q0d1ma@example.org`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEmailExpression;

impl RandomEmailExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_EMAIL";
}

impl Expression for RandomEmailExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random e-mail address on a reserved example domain"
    }

    fn transform(&self, _input: &ExpressionInput) -> String {
        let local = sample(LOWER_ALPHANUMERIC, EMAIL_LOCAL_LENGTH);
        let domain = EMAIL_DOMAINS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(EMAIL_DOMAINS[0]);
        format!("{local}@{domain}")
    }
}

/// `${RANDOM_ENUM(RED, GREEN, BLUE)}` or `${RANDOM_ENUM(values="RED|GREEN")}`
/// → one of the listed values. No values renders as the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEnumExpression;

impl RandomEnumExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_ENUM";
}

impl Expression for RandomEnumExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "One of the given values; arguments: positional values or values=\"A|B|C\""
    }

    fn transform(&self, input: &ExpressionInput) -> String {
        let mut values: Vec<&str> = input
            .arguments()
            .iter()
            .filter(|arg| arg.name().is_none())
            .map(ExpressionArgument::value)
            .collect();
        if values.is_empty()
            && let Some(list) = input.argument("values")
        {
            values = list.split('|').collect();
        }
        values
            .choose(&mut rand::rng())
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}
