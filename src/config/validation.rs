//! Configuration validation.
//!
//! Checks that a deserialised [`EngineConfig`] describes an unambiguous
//! placeholder syntax and sane limits. Errors make the configuration
//! unusable; warnings are reported but do not block loading.

use crate::config::schema::{EngineConfig, RenderLimits, Syntax};
use crate::error::{Severity, ValidationIssue};
use crate::expression::ExpressionSettings;

/// String lengths above this draw a warning.
const LARGE_STRING_LENGTH: usize = 1024 * 1024;

/// Outcome of validating one configuration.
#[derive(Debug, Default, Clone)]
pub struct ValidationResult {
    /// All issues in discovery order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if no error-severity issue was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Error-severity issues.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Warning-severity issues.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }
}

/// Validates engine configurations.
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `config` and returns every issue found.
    #[must_use]
    pub fn validate(mut self, config: &EngineConfig) -> ValidationResult {
        self.check_syntax(&config.syntax);
        self.check_limits(&config.limits);
        self.check_expressions(&config.expressions);
        ValidationResult {
            issues: self.issues,
        }
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
            severity: Severity::Error,
        });
    }

    fn warning(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }

    fn check_syntax(&mut self, syntax: &Syntax) {
        if syntax.start.is_empty() {
            self.error("syntax.start", "delimiter must not be empty");
        }
        if syntax.end.is_empty() {
            self.error("syntax.end", "delimiter must not be empty");
        }
        if !syntax.start.is_empty() && syntax.start == syntax.end {
            self.error("syntax.end", "must differ from syntax.start");
        }

        for (path, ch) in [
            ("syntax.args_open", syntax.args_open),
            ("syntax.args_close", syntax.args_close),
            ("syntax.separator", syntax.separator),
        ] {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch.is_whitespace() || ch == '"' {
                self.error(
                    path,
                    format!("'{ch}' collides with identifier, whitespace or quote characters"),
                );
            }
        }
        if syntax.args_open == syntax.args_close {
            self.error("syntax.args_close", "must differ from syntax.args_open");
        }
        if syntax.separator == syntax.args_open || syntax.separator == syntax.args_close {
            self.error("syntax.separator", "must differ from the argument brackets");
        }
        if syntax.end.contains(syntax.args_close) || syntax.end.contains(syntax.separator) {
            self.warning(
                "syntax.end",
                "contains argument punctuation; placeholders with arguments will be cut short",
            );
        }

        match syntax.escape.as_deref() {
            Some("") => self.error("syntax.escape", "must not be empty (use null to disable)"),
            Some(escape) if escape == syntax.start => {
                self.error("syntax.escape", "must differ from syntax.start");
            }
            Some(escape) if escape_is_shadowed(escape, &syntax.start) => {
                self.error(
                    "syntax.escape",
                    "overlaps syntax.start and would never be recognised",
                );
            }
            _ => {}
        }
    }

    fn check_limits(&mut self, limits: &RenderLimits) {
        if limits.max_expansions == 0 {
            self.warning(
                "limits.max_expansions",
                "is zero; every placeholder will pass through unexpanded",
            );
        }
        if limits.max_placeholder_length == 0 {
            self.error("limits.max_placeholder_length", "must be greater than zero");
        }
    }

    fn check_expressions(&mut self, settings: &ExpressionSettings) {
        if settings.max_string_length == 0 {
            self.warning(
                "expressions.max_string_length",
                "is zero; RANDOM_STRING and RANDOM_PASSWORD will render empty",
            );
        } else if settings.max_string_length > LARGE_STRING_LENGTH {
            self.warning(
                "expressions.max_string_length",
                format!("exceeds {LARGE_STRING_LENGTH} bytes; responses may become very large"),
            );
        }
        if settings.enable_environment {
            self.warning(
                "expressions.enable_environment",
                "templates can read any process environment variable",
            );
        }
    }
}

/// The scanner matches the first start delimiter, so an escape is lost when
/// a start delimiter already begins inside it.
fn escape_is_shadowed(escape: &str, start: &str) -> bool {
    !start.is_empty() && format!("{escape}{start}").find(start) != Some(escape.len())
}
