//! Configuration loader
//!
//! Loading pipeline:
//! 1. Existence and size checks
//! 2. YAML parsing into [`EngineConfig`]
//! 3. `MOCKEXPR_*` environment overrides for limits
//! 4. Validation (errors abort, warnings are returned)

use std::path::{Path, PathBuf};

use crate::config::schema::EngineConfig;
use crate::config::validation::Validator;
use crate::error::ConfigError;

// ============================================================================
// Public API
// ============================================================================

/// Default maximum configuration file size (1 MiB).
pub const DEFAULT_MAX_CONFIG_SIZE: u64 = 1024 * 1024;

/// Environment variable overriding `limits.max_expansions`.
pub const ENV_MAX_EXPANSIONS: &str = "MOCKEXPR_MAX_EXPANSIONS";

/// Environment variable overriding `limits.max_placeholder_length`.
pub const ENV_MAX_PLACEHOLDER_LENGTH: &str = "MOCKEXPR_MAX_PLACEHOLDER_LENGTH";

/// Environment variable overriding `expressions.max_string_length`.
pub const ENV_MAX_STRING_LENGTH: &str = "MOCKEXPR_MAX_STRING_LENGTH";

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum configuration file size in bytes.
    pub max_config_size: u64,

    /// Apply `MOCKEXPR_*` environment overrides after parsing.
    pub env_overrides: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_config_size: DEFAULT_MAX_CONFIG_SIZE,
            env_overrides: true,
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: EngineConfig,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads, overrides and validates a configuration file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingFile`] if `path` does not exist
    /// - [`ConfigError::TooLarge`] if the file exceeds the size limit
    /// - [`ConfigError::ParseError`] for empty files or invalid YAML
    /// - [`ConfigError::InvalidValue`] for unparsable environment overrides
    /// - [`ConfigError::ValidationError`] if validation reports errors
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if metadata.len() > self.options.max_config_size {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.options.max_config_size,
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), bytes = raw.len(), "loading engine configuration");
        self.load_str(&raw, path)
    }

    /// Parses, overrides and validates configuration text.
    ///
    /// `origin` is used only for error messages.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the file checks.
    pub fn load_str(&self, raw: &str, origin: &Path) -> Result<LoadResult, ConfigError> {
        let mut config = parse(raw, origin)?;

        if self.options.env_overrides {
            apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        }

        let result = Validator::new().validate(&config);
        if !result.is_valid() {
            return Err(ConfigError::ValidationError {
                path: origin.display().to_string(),
                errors: result.errors().cloned().collect(),
            });
        }

        let warnings = result
            .warnings()
            .map(|issue| LoadWarning {
                message: issue.message.clone(),
                location: Some(issue.path.clone()),
            })
            .collect();

        Ok(LoadResult { config, warnings })
    }
}

// ============================================================================
// Pipeline steps
// ============================================================================

fn parse(raw: &str, origin: &Path) -> Result<EngineConfig, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::ParseError {
            path: origin.to_path_buf(),
            line: None,
            message: "configuration file is empty".to_string(),
        });
    }

    serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
        path: PathBuf::from(origin),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })
}

/// Applies `MOCKEXPR_*` overrides using `lookup` to read variables.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] when a variable is set but is not a
/// non-negative integer.
pub fn apply_env_overrides<F>(config: &mut EngineConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| -> Result<Option<usize>, ConfigError> {
        lookup(key)
            .map(|value| {
                value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                    field: key.to_string(),
                    value,
                    expected: "a non-negative integer".to_string(),
                })
            })
            .transpose()
    };

    if let Some(v) = read(ENV_MAX_EXPANSIONS)? {
        tracing::debug!(value = v, "max_expansions overridden from environment");
        config.limits.max_expansions = v;
    }
    if let Some(v) = read(ENV_MAX_PLACEHOLDER_LENGTH)? {
        tracing::debug!(value = v, "max_placeholder_length overridden from environment");
        config.limits.max_placeholder_length = v;
    }
    if let Some(v) = read(ENV_MAX_STRING_LENGTH)? {
        tracing::debug!(value = v, "max_string_length overridden from environment");
        config.expressions.max_string_length = v;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn loader() -> ConfigLoader {
        ConfigLoader::new(LoaderOptions {
            env_overrides: false,
            ..LoaderOptions::default()
        })
    }

    fn origin() -> PathBuf {
        PathBuf::from("engine.yaml")
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "limits:\n  max_expansions: 5").unwrap();
        let result = loader().load(file.path()).unwrap();
        assert_eq!(result.config.limits.max_expansions, 5);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_file() {
        let err = loader()
            .load(Path::new("/definitely/not/here.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn oversized_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# {}", "x".repeat(64)).unwrap();
        let loader = ConfigLoader::new(LoaderOptions {
            max_config_size: 16,
            env_overrides: false,
        });
        let err = loader.load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge { limit: 16, .. }));
    }

    #[test]
    fn empty_file_rejected() {
        let err = loader().load_str("  \n", &origin()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn yaml_error_has_line() {
        let err = loader()
            .load_str("syntax:\n  start: [unclosed\n", &origin())
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { line: Some(_), .. }), "{err:?}");
    }

    #[test]
    fn validation_errors_abort() {
        let err = loader()
            .load_str("syntax:\n  start: \"\"\n", &origin())
            .unwrap_err();
        match err {
            ConfigError::ValidationError { errors, .. } => {
                assert_eq!(errors[0].path, "syntax.start");
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn warnings_are_returned() {
        let result = loader()
            .load_str("expressions:\n  enable_environment: true\n", &origin())
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(
            result.warnings[0].location.as_deref(),
            Some("expressions.enable_environment")
        );
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            (ENV_MAX_EXPANSIONS, "7"),
            (ENV_MAX_STRING_LENGTH, " 99 "),
        ]
        .into_iter()
        .collect();
        let mut config = EngineConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).map(ToString::to_string)).unwrap();
        assert_eq!(config.limits.max_expansions, 7);
        assert_eq!(config.expressions.max_string_length, 99);
        assert_eq!(
            config.limits.max_placeholder_length,
            EngineConfig::default().limits.max_placeholder_length
        );
    }

    #[test]
    fn env_override_garbage_rejected() {
        let mut config = EngineConfig::default();
        let err = apply_env_overrides(&mut config, |k| {
            (k == ENV_MAX_PLACEHOLDER_LENGTH).then(|| "lots".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
