//! Boolean and UUID expressions.

use rand::Rng;

use super::{Expression, ExpressionInput};

/// `${RANDOM_BOOLEAN}` → `true` or `false`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBooleanExpression;

impl RandomBooleanExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_BOOLEAN";
}

impl Expression for RandomBooleanExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random boolean (true or false)"
    }

    fn transform(&self, _input: &ExpressionInput) -> String {
        rand::rng().random::<bool>().to_string()
    }
}

/// `${RANDOM_UUID}` → hyphenated v4 UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuidExpression;

impl RandomUuidExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "RANDOM_UUID";
}

impl Expression for RandomUuidExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Random version 4 UUID"
    }

    fn transform(&self, _input: &ExpressionInput) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
