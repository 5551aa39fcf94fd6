//! Template rendering.
//!
//! [`TemplateEngine`] walks a template once with the [`Scanner`], parses each
//! placeholder body, resolves the identifier against an
//! [`ExpressionRegistry`] and splices the generated value into the output.
//!
//! Rendering never fails. Anything that cannot be expanded (unknown
//! identifiers, malformed bodies, unterminated placeholders, placeholders
//! past the expansion limit) is copied to the output unchanged.

pub mod placeholder;
pub mod scanner;

use std::sync::{Arc, LazyLock};
use std::time::Instant;

use serde::Serialize;

use crate::config::schema::{EngineConfig, RenderLimits, Syntax};
use crate::error::RegistryError;
use crate::observability::metrics::{self, PlaceholderOutcome};
use crate::registry::ExpressionRegistry;

pub use placeholder::{PlaceholderError, parse_placeholder};
pub use scanner::{Scanner, Segment, has_placeholders};

/// What happened while rendering one template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// Placeholders replaced with generated values.
    pub substituted: usize,

    /// Identifiers with no registered expression, in template order.
    pub unknown: Vec<String>,

    /// Placeholders whose body could not be parsed.
    pub malformed: usize,

    /// Whether the template ended inside a placeholder.
    pub unterminated: bool,

    /// Placeholders left raw because the expansion limit was reached.
    pub skipped: usize,

    /// Escaped start delimiters written literally.
    pub escaped: usize,
}

impl RenderReport {
    /// Returns `true` if every placeholder was expanded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.malformed == 0 && !self.unterminated && self.skipped == 0
    }
}

/// Rendered output together with its [`RenderReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    /// The rendered text.
    pub output: String,

    /// Diagnostics collected while rendering.
    pub report: RenderReport,
}

/// Expands expression placeholders in templates.
///
/// The engine is immutable after construction and can be shared across
/// threads; each render owns its output buffer.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    registry: Arc<ExpressionRegistry>,
    syntax: Syntax,
    limits: RenderLimits,
}

impl TemplateEngine {
    /// Creates an engine over `registry`.
    #[must_use]
    pub const fn new(registry: Arc<ExpressionRegistry>, syntax: Syntax, limits: RenderLimits) -> Self {
        Self {
            registry,
            syntax,
            limits,
        }
    }

    /// Builds an engine with the built-in expressions configured by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the built-in set cannot be registered.
    pub fn from_config(config: &EngineConfig) -> Result<Self, RegistryError> {
        let registry = ExpressionRegistry::builtin(&config.expressions)?;
        Ok(Self::new(
            Arc::new(registry),
            config.syntax.clone(),
            config.limits,
        ))
    }

    /// The registry placeholders are resolved against.
    #[must_use]
    pub fn registry(&self) -> &ExpressionRegistry {
        &self.registry
    }

    /// The placeholder syntax.
    #[must_use]
    pub const fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// The render limits.
    #[must_use]
    pub const fn limits(&self) -> RenderLimits {
        self.limits
    }

    /// Returns `true` if `template` may contain a placeholder.
    ///
    /// Templates for which this returns `false` render unchanged unless they
    /// contain an escaped start delimiter.
    #[must_use]
    pub fn contains_placeholders(&self, template: &str) -> bool {
        has_placeholders(template, &self.syntax)
    }

    /// Renders `template`, expanding every resolvable placeholder.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let mut report = RenderReport::default();
        self.render_into(template, &mut report)
    }

    /// Renders `template` and reports what was and was not expanded.
    #[must_use]
    pub fn render_with_report(&self, template: &str) -> Rendered {
        let mut report = RenderReport::default();
        let output = self.render_into(template, &mut report);
        Rendered { output, report }
    }

    fn render_into(&self, template: &str, report: &mut RenderReport) -> String {
        let started = Instant::now();
        let mut output = String::with_capacity(template.len());

        let scanner = Scanner::new(template, &self.syntax, self.limits.max_placeholder_length);
        for segment in scanner {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Escaped(delimiter) => {
                    report.escaped += 1;
                    output.push_str(delimiter);
                }
                Segment::Unterminated(text) => {
                    tracing::debug!(
                        length = text.len(),
                        "unterminated placeholder, copying remainder verbatim"
                    );
                    report.unterminated = true;
                    output.push_str(text);
                }
                Segment::Placeholder { raw, body } => {
                    if report.substituted >= self.limits.max_expansions {
                        if report.skipped == 0 {
                            tracing::warn!(
                                limit = self.limits.max_expansions,
                                "expansion limit reached, leaving remaining placeholders unexpanded"
                            );
                        }
                        report.skipped += 1;
                        metrics::record_placeholder(None, PlaceholderOutcome::Skipped);
                        output.push_str(raw);
                        continue;
                    }
                    self.expand(raw, body, &mut output, report);
                }
            }
        }

        metrics::record_render(started.elapsed());
        output
    }

    fn expand(&self, raw: &str, body: &str, output: &mut String, report: &mut RenderReport) {
        let input = match parse_placeholder(body, &self.syntax) {
            Ok(input) => input,
            Err(error) => {
                tracing::debug!(placeholder = raw, %error, "malformed placeholder left as is");
                report.malformed += 1;
                metrics::record_placeholder(None, PlaceholderOutcome::Malformed);
                output.push_str(raw);
                return;
            }
        };

        let Some(expression) = self.registry.resolve(input.identifier()) else {
            let suggestion = self.registry.suggest(input.identifier());
            tracing::debug!(
                identifier = input.identifier(),
                suggestion,
                "unknown expression left as is"
            );
            report.unknown.push(input.identifier().to_string());
            metrics::record_placeholder(None, PlaceholderOutcome::Unknown);
            output.push_str(raw);
            return;
        };

        let value = expression.transform(&input);
        tracing::trace!(identifier = expression.identifier(), value = %value, "expanded placeholder");
        output.push_str(&value);
        report.substituted += 1;
        metrics::record_placeholder(Some(expression.identifier()), PlaceholderOutcome::Substituted);
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(
            ExpressionRegistry::global(),
            Syntax::default(),
            RenderLimits::default(),
        )
    }
}

static DEFAULT_ENGINE: LazyLock<TemplateEngine> = LazyLock::new(TemplateEngine::default);

/// Renders `template` with the built-in expressions and default syntax.
#[must_use]
pub fn render(template: &str) -> String {
    DEFAULT_ENGINE.render(template)
}
