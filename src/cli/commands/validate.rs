//! `validate` command: checks engine configuration files.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::ConfigLoader;
use crate::error::{ConfigError, MockExprError, Severity, ValidationIssue};

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Validate each file, reporting every result before failing.
///
/// # Errors
///
/// Returns the first failure: a load or validation error, or with
/// `--strict` a file that produced warnings.
pub fn run(args: &ValidateArgs) -> Result<(), MockExprError> {
    let loader = ConfigLoader::default();
    let mut reports = Vec::with_capacity(args.files.len());
    let mut first_failure = None;

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating configuration");
        let (report, failure) = check(&loader, path, args.strict);
        if failure.is_some() && first_failure.is_none() {
            first_failure = failure;
        }
        reports.push(report);
    }

    match args.format {
        OutputFormat::Human => {
            for report in &reports {
                let status = if report.valid { "ok" } else { "FAILED" };
                println!("{}: {status}", report.file);
                for message in report.errors.iter().chain(&report.warnings) {
                    println!("  {message}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    first_failure.map_or(Ok(()), Err)
}

fn check(loader: &ConfigLoader, path: &Path, strict: bool) -> (FileReport, Option<MockExprError>) {
    let file = path.display().to_string();
    match loader.load(path) {
        Ok(result) => {
            let issues: Vec<ValidationIssue> = result
                .warnings
                .into_iter()
                .map(|w| ValidationIssue {
                    path: w.location.unwrap_or_default(),
                    message: w.message,
                    severity: Severity::Warning,
                })
                .collect();
            let warnings = issues.iter().map(ToString::to_string).collect();
            let failure = (strict && !issues.is_empty()).then(|| {
                MockExprError::Config(ConfigError::ValidationError {
                    path: file.clone(),
                    errors: issues,
                })
            });
            let report = FileReport {
                file,
                valid: failure.is_none(),
                errors: Vec::new(),
                warnings,
            };
            (report, failure)
        }
        Err(err) => {
            let errors = match &err {
                ConfigError::ValidationError { errors, .. } => {
                    errors.iter().map(ToString::to_string).collect()
                }
                other => vec![other.to_string()],
            };
            let report = FileReport {
                file,
                valid: false,
                errors,
                warnings: Vec::new(),
            };
            (report, Some(err.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn valid_file() {
        let file = config_file("limits:\n  max_expansions: 10\n");
        let (report, failure) = check(&ConfigLoader::default(), file.path(), false);
        assert!(report.valid);
        assert!(failure.is_none());
    }

    #[test]
    fn strict_turns_warnings_into_failure() {
        let file = config_file("expressions:\n  enable_environment: true\n");
        let (report, failure) = check(&ConfigLoader::default(), file.path(), false);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(failure.is_none());

        let (report, failure) = check(&ConfigLoader::default(), file.path(), true);
        assert!(!report.valid);
        assert!(matches!(failure, Some(MockExprError::Config(_))));
    }

    #[test]
    fn invalid_file_lists_errors() {
        let file = config_file("syntax:\n  start: \"\"\n  end: \"\"\n");
        let (report, failure) = check(&ConfigLoader::default(), file.path(), false);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("syntax.start"));
        assert!(failure.is_some());
    }
}
