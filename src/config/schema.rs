//! Engine configuration schema.
//!
//! ```yaml
//! syntax:
//!   start: "${"
//!   end: "}"
//!   args_open: "("
//!   args_close: ")"
//!   separator: ","
//!   escape: "$"
//! limits:
//!   max_expansions: 10000
//!   max_placeholder_length: 1024
//! expressions:
//!   max_string_length: 4096
//!   enable_environment: false
//! ```
//!
//! Every section and field is optional; omitted values take the defaults
//! shown above.

use serde::{Deserialize, Serialize};

use crate::expression::ExpressionSettings;

/// Default start delimiter.
pub const DEFAULT_START: &str = "${";

/// Default end delimiter.
pub const DEFAULT_END: &str = "}";

/// Default escape prefix (`$${` renders as a literal `${`).
pub const DEFAULT_ESCAPE: &str = "$";

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Placeholder syntax.
    pub syntax: Syntax,

    /// Per-render resource limits.
    pub limits: RenderLimits,

    /// Built-in expression settings.
    pub expressions: ExpressionSettings,
}

/// Placeholder delimiters and argument punctuation.
///
/// With the defaults a placeholder reads `${NAME}` or
/// `${NAME(arg, name=value, "quoted, value")}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Syntax {
    /// Opens a placeholder.
    pub start: String,

    /// Closes a placeholder. The first occurrence after `start` ends it.
    pub end: String,

    /// Opens the argument list after the identifier.
    pub args_open: char,

    /// Closes the argument list.
    pub args_close: char,

    /// Separates arguments.
    pub separator: char,

    /// Prefix that makes the following `start` delimiter literal.
    /// `None` disables escaping.
    pub escape: Option<String>,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.to_string(),
            end: DEFAULT_END.to_string(),
            args_open: '(',
            args_close: ')',
            separator: ',',
            escape: Some(DEFAULT_ESCAPE.to_string()),
        }
    }
}

/// Bounds applied to a single render.
///
/// Templates are user-authored, so these keep one pathological template
/// from monopolising a request thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderLimits {
    /// Placeholders substituted per render; later ones pass through raw.
    pub max_expansions: usize,

    /// Longest placeholder body in bytes; longer spans are literal text.
    pub max_placeholder_length: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_expansions: 10_000,
            max_placeholder_length: 1024,
        }
    }
}
