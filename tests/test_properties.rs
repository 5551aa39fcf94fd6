//! Property tests for the renderer.

use std::sync::Arc;

use mockexpr::config::{RenderLimits, Syntax};
use mockexpr::{ExpressionRegistry, TemplateEngine};
use proptest::prelude::*;

fn empty_engine() -> TemplateEngine {
    TemplateEngine::new(
        Arc::new(ExpressionRegistry::new()),
        Syntax::default(),
        RenderLimits::default(),
    )
}

proptest! {
    /// Text without a start delimiter renders to itself.
    #[test]
    fn text_without_delimiters_is_unchanged(template in "[^$]*") {
        prop_assert_eq!(TemplateEngine::default().render(&template), template);
    }

    /// With nothing registered, every template is reproduced exactly unless
    /// it uses the escape sequence.
    #[test]
    fn empty_registry_is_identity(template in r"[a-z ${}()\x22,=]{0,64}") {
        prop_assume!(!template.contains("$${"));
        prop_assert_eq!(empty_engine().render(&template), template);
    }

    /// Unknown identifiers pass through regardless of surrounding text.
    #[test]
    fn unknown_identifiers_pass_through(
        prefix in "[a-zA-Z0-9 .:]{0,20}",
        identifier in "ZZ_[A-Z0-9_]{1,12}",
        suffix in "[a-zA-Z0-9 .:]{0,20}",
    ) {
        let template = format!("{prefix}${{{identifier}}}{suffix}");
        prop_assert_eq!(TemplateEngine::default().render(&template), template);
    }

    /// Known placeholders are fully replaced.
    #[test]
    fn known_placeholders_leave_no_delimiters(
        parts in prop::collection::vec("[a-d ]{0,8}", 1..6),
    ) {
        let template = parts.join("${RANDOM_BOOLEAN}");
        let output = TemplateEngine::default().render(&template);
        prop_assert!(!output.contains("${"), "output still contains a placeholder delimiter: {}", output);
        prop_assert_eq!(
            output.matches("true").count() + output.matches("false").count(),
            parts.len() - 1
        );
    }

    /// Rendering arbitrary input never panics and never loses literal text
    /// before the first delimiter.
    #[test]
    fn arbitrary_input_keeps_leading_literal(template in any::<String>()) {
        let output = TemplateEngine::default().render(&template);
        let head = template.split("${").next().unwrap_or_default();
        let head = head.strip_suffix('$').unwrap_or(head);
        prop_assert!(output.starts_with(head));
    }

    /// Every built-in accepts arbitrary arguments without panicking.
    #[test]
    fn builtins_tolerate_arbitrary_arguments(
        index in any::<prop::sample::Index>(),
        args in prop::collection::vec(argument(), 0..4),
    ) {
        let engine = TemplateEngine::default();
        let identifiers: Vec<&str> = engine.registry().identifiers().collect();
        let identifier = identifiers[index.index(identifiers.len())];
        let template = format!("${{{identifier}({})}}", args.join(", "));
        let rendered = engine.render_with_report(&template);
        prop_assert!(rendered.report.unknown.is_empty());
    }
}

/// A bare, named or quoted argument with a numeric or textual value.
fn argument() -> impl Strategy<Value = String> {
    let value = prop_oneof![
        any::<f64>().prop_map(|v| v.to_string()),
        any::<i64>().prop_map(|v| v.to_string()),
        any::<u64>().prop_map(|v| v.to_string()),
        prop::num::f64::NORMAL.prop_map(|v| format!("{v:e}")),
        "[a-z0-9|. -]{0,12}",
    ];
    let name = prop::sample::select(vec!["", "min", "max", "scale", "length", "values", "name", "default"]);
    (name, value, any::<bool>()).prop_map(|(name, value, quoted)| {
        let value = if quoted { format!("\"{value}\"") } else { value };
        if name.is_empty() { value } else { format!("{name}={value}") }
    })
}
