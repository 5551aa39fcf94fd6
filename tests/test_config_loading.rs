//! Loading engine configuration files and rendering with them.

mod common;

use std::io::Write;

use common::fixture;
use mockexpr::TemplateEngine;
use mockexpr::config::{ConfigLoader, EngineConfig, LoaderOptions};
use mockexpr::error::ConfigError;

fn loader() -> ConfigLoader {
    ConfigLoader::new(LoaderOptions {
        env_overrides: false,
        ..LoaderOptions::default()
    })
}

#[test]
fn fixture_config_loads_cleanly() {
    let result = loader().load(&fixture("engine.yaml")).unwrap();
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert_eq!(result.config.syntax.start, "{{");
    assert_eq!(result.config.syntax.end, "}}");
    assert_eq!(result.config.syntax.escape, None);
    assert_eq!(result.config.limits.max_expansions, 2);
    assert_eq!(result.config.expressions.max_string_length, 64);
}

#[test]
fn engine_from_loaded_config() {
    let config = loader().load(&fixture("engine.yaml")).unwrap().config;
    let engine = TemplateEngine::from_config(&config).unwrap();

    let rendered =
        engine.render_with_report("{{RANDOM_STRING(length=1000)}}|{{RANDOM_UUID}}|{{RANDOM_UUID}}");
    let parts: Vec<&str> = rendered.output.split('|').collect();
    assert_eq!(parts[0].len(), 64);
    assert_eq!(parts[1].len(), 36);
    assert_eq!(parts[2], "{{RANDOM_UUID}}");
    assert_eq!(rendered.report.skipped, 1);
}

#[test]
fn invalid_fixture_reports_every_error() {
    let err = loader().load(&fixture("invalid.yaml")).unwrap_err();
    let ConfigError::ValidationError { errors, .. } = err else {
        panic!("expected validation error, got {err:?}");
    };
    let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
    assert!(paths.contains(&"syntax.end"), "{paths:?}");
    assert!(paths.contains(&"limits.max_placeholder_length"), "{paths:?}");
}

#[test]
fn environment_opt_in_warns() {
    let result = loader().load(&fixture("env_enabled.yaml")).unwrap();
    assert!(result.config.expressions.enable_environment);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn unknown_keys_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "limits:\n  max_expansion: 5").unwrap();
    let err = loader().load(file.path()).unwrap_err();
    assert!(
        matches!(err, ConfigError::ParseError { .. }),
        "expected parse error, got {err:?}"
    );
    assert!(err.to_string().contains("max_expansion"));
}

#[test]
fn partial_config_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "syntax:\n  separator: ';'").unwrap();
    let config = loader().load(file.path()).unwrap().config;
    let defaults = EngineConfig::default();
    assert_eq!(config.syntax.separator, ';');
    assert_eq!(config.syntax.start, defaults.syntax.start);
    assert_eq!(config.limits, defaults.limits);
}
