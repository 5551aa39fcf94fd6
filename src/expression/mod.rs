//! Expression capability and built-in expressions.
//!
//! An expression is a named generator invoked from a template placeholder
//! such as `${RANDOM_INTEGER(min=1, max=6)}`. Expressions are registered once
//! in an [`ExpressionRegistry`](crate::registry::ExpressionRegistry) and then
//! shared read-only across every render.
//!
//! # Built-ins
//!
//! | Identifier | Module |
//! |------------|--------|
//! | `RANDOM_DATE`, `RANDOM_DATE_TIME`, `RANDOM_TIMESTAMP` | [`date`] |
//! | `RANDOM_INTEGER`, `RANDOM_LONG`, `RANDOM_DECIMAL` | [`numeric`] |
//! | `RANDOM_STRING`, `RANDOM_PASSWORD`, `RANDOM_EMAIL`, `RANDOM_ENUM` | [`text`] |
//! | `RANDOM_BOOLEAN`, `RANDOM_UUID` | [`identity`] |
//! | `ENVIRONMENT_VARIABLE` | [`environment`] |

pub mod date;
pub mod environment;
pub mod identity;
pub mod numeric;
pub mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use date::{RandomDateExpression, RandomDateTimeExpression, RandomTimestampExpression};
pub use environment::EnvironmentVariableExpression;
pub use identity::{RandomBooleanExpression, RandomUuidExpression};
pub use numeric::{RandomDecimalExpression, RandomIntegerExpression, RandomLongExpression};
pub use text::{
    RandomEmailExpression, RandomEnumExpression, RandomPasswordExpression, RandomStringExpression,
};

// ============================================================================
// Core Trait
// ============================================================================

/// A named value generator that can be embedded in a template.
///
/// Implementations hold no mutable state. `transform` may read the clock and
/// a thread-local RNG, so concurrent calls on one instance are safe.
pub trait Expression: Send + Sync + fmt::Debug {
    /// Canonical identifier, e.g. `RANDOM_DATE`.
    fn identifier(&self) -> &'static str;

    /// One-line description shown by `mockexpr expressions`.
    fn description(&self) -> &'static str;

    /// Returns `true` if this expression handles `identifier`.
    ///
    /// The default is an ASCII case-insensitive comparison with
    /// [`identifier`](Self::identifier).
    fn matches(&self, identifier: &str) -> bool {
        self.identifier().eq_ignore_ascii_case(identifier)
    }

    /// Produces the replacement text for one placeholder occurrence.
    ///
    /// Never fails. Invalid arguments fall back to the documented default.
    fn transform(&self, input: &ExpressionInput) -> String;
}

// ============================================================================
// Input
// ============================================================================

/// A single argument captured from a placeholder's argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionArgument {
    name: Option<String>,
    value: String,
}

impl ExpressionArgument {
    /// Creates a positional argument.
    #[must_use]
    pub fn positional(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    /// Creates a `name=value` argument.
    #[must_use]
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// Argument name, if written as `name=value`.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Argument value with surrounding quotes removed.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ExpressionArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}={}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// One recognized placeholder: its identifier and parsed arguments.
///
/// Built by the placeholder parser and handed to
/// [`Expression::transform`] by reference. There are no mutating accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionInput {
    identifier: String,
    arguments: Vec<ExpressionArgument>,
}

impl ExpressionInput {
    /// Creates an input from an identifier and its arguments.
    #[must_use]
    pub fn new(identifier: impl Into<String>, arguments: Vec<ExpressionArgument>) -> Self {
        Self {
            identifier: identifier.into(),
            arguments,
        }
    }

    /// Creates an input with no arguments.
    #[must_use]
    pub fn bare(identifier: impl Into<String>) -> Self {
        Self::new(identifier, Vec::new())
    }

    /// The identifier token as written in the template.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// All arguments in source order.
    #[must_use]
    pub fn arguments(&self) -> &[ExpressionArgument] {
        &self.arguments
    }

    /// Value of the first argument named `name` (ASCII case-insensitive).
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|arg| arg.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            .map(ExpressionArgument::value)
    }

    /// Value of the `index`-th positional argument.
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.arguments
            .iter()
            .filter(|arg| arg.name().is_none())
            .nth(index)
            .map(ExpressionArgument::value)
    }

    /// Named argument `name`, falling back to positional argument `index`.
    #[must_use]
    pub fn argument_or_positional(&self, name: &str, index: usize) -> Option<&str> {
        self.argument(name).or_else(|| self.positional(index))
    }

    /// Parses argument `name` (or positional `index`) as `T`.
    ///
    /// Missing arguments yield `default` silently. Present but unparsable
    /// arguments yield `default` and are logged at debug level.
    pub(crate) fn parse_or<T>(&self, name: &str, index: usize, default: T) -> T
    where
        T: FromStr + fmt::Debug,
    {
        let Some(raw) = self.argument_or_positional(name, index) else {
            return default;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(
                expression = %self.identifier,
                argument = name,
                value = raw,
                ?default,
                "unparsable expression argument, using default"
            );
            default
        })
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Upper bound applied to generated string lengths when not configured.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 4096;

/// Settings that shape the built-in expression set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpressionSettings {
    /// Cap on `length` for `RANDOM_STRING` and `RANDOM_PASSWORD`.
    pub max_string_length: usize,

    /// Registers `ENVIRONMENT_VARIABLE`. Off by default since templates are
    /// user-authored and the process environment may hold secrets.
    pub enable_environment: bool,
}

impl Default for ExpressionSettings {
    fn default() -> Self {
        Self {
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            enable_environment: false,
        }
    }
}

/// Builds the built-in expression set in registration order.
#[must_use]
pub fn builtin_expressions(settings: &ExpressionSettings) -> Vec<Box<dyn Expression>> {
    let mut expressions: Vec<Box<dyn Expression>> = vec![
        Box::new(RandomDateExpression),
        Box::new(RandomDateTimeExpression),
        Box::new(RandomTimestampExpression),
        Box::new(RandomIntegerExpression),
        Box::new(RandomLongExpression),
        Box::new(RandomDecimalExpression),
        Box::new(RandomBooleanExpression),
        Box::new(RandomUuidExpression),
        Box::new(RandomStringExpression::new(settings.max_string_length)),
        Box::new(RandomPasswordExpression::new(settings.max_string_length)),
        Box::new(RandomEmailExpression),
        Box::new(RandomEnumExpression),
    ];
    if settings.enable_environment {
        expressions.push(Box::new(EnvironmentVariableExpression));
    }
    expressions
}

// ============================================================================
// Tests
// ============================================================================
