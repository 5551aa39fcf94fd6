//! Process environment lookup.
//!
//! Only registered when `expressions.enable_environment` is set, since a
//! template author could otherwise read any variable the server holds.

use super::{Expression, ExpressionInput};

/// `${ENVIRONMENT_VARIABLE(name=HOME, default="n/a")}` → variable value,
/// `default` when unset or not valid Unicode, empty when neither exists
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentVariableExpression;

impl EnvironmentVariableExpression {
    /// Identifier claimed by this expression.
    pub const IDENTIFIER: &'static str = "ENVIRONMENT_VARIABLE";
}

impl Expression for EnvironmentVariableExpression {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Value of a process environment variable; arguments: name, default"
    }

    fn transform(&self, input: &ExpressionInput) -> String {
        let fallback = || input.argument_or_positional("default", 1).unwrap_or_default();
        let Some(name) = input.argument_or_positional("name", 0) else {
            tracing::debug!("ENVIRONMENT_VARIABLE without a name argument");
            return fallback().to_string();
        };
        let name = name.trim();
        if name.is_empty() || name.contains(['=', '\0']) {
            tracing::debug!(name, "invalid environment variable name");
            return fallback().to_string();
        }
        std::env::var(name).unwrap_or_else(|_| fallback().to_string())
    }
}
