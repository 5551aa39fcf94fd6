//! `render` command: expands a template file or stdin to stdout.

use std::io::{Read, Write};
use std::path::Path;

use crate::cli::args::{OutputFormat, RenderArgs};
use crate::error::MockExprError;
use crate::observability::init_metrics;
use crate::template::{RenderReport, Rendered};

/// Render the template `args.repeat` times.
///
/// # Errors
///
/// Returns an error if the template or configuration cannot be read, or,
/// with `--strict`, if any placeholder was left unexpanded.
pub fn run(args: &RenderArgs) -> Result<(), MockExprError> {
    let engine = super::load_engine(args.config.as_deref())?;
    let template = read_template(args.file.as_deref())?;
    let metrics = if args.metrics {
        Some(init_metrics()?)
    } else {
        None
    };

    if !engine.contains_placeholders(&template) {
        tracing::info!("template contains no placeholders");
    }

    let mut stdout = std::io::stdout().lock();
    let mut unresolved = 0;
    for index in 0..args.repeat {
        let Rendered { output, report } = engine.render_with_report(&template);
        unresolved += unresolved_count(&report);

        match args.format {
            OutputFormat::Human => {
                stdout.write_all(output.as_bytes())?;
                if args.repeat > 1 && !output.ends_with('\n') {
                    writeln!(stdout)?;
                }
                if args.report {
                    eprintln!("{}", summarize(&report));
                }
            }
            OutputFormat::Json => {
                let record = if args.report {
                    serde_json::json!({ "index": index, "output": output, "report": report })
                } else {
                    serde_json::json!({ "index": index, "output": output })
                };
                writeln!(stdout, "{record}")?;
            }
        }
    }
    stdout.flush()?;

    if let Some(handle) = metrics {
        eprint!("{}", handle.render());
    }

    if args.strict && unresolved > 0 {
        return Err(MockExprError::Unresolved { count: unresolved });
    }
    Ok(())
}

fn read_template(path: Option<&Path>) -> Result<String, MockExprError> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|e| {
                MockExprError::Io(std::io::Error::new(
                    e.kind(),
                    format!("{}: {e}", path.display()),
                ))
            })
        }
        _ => {
            let mut template = String::new();
            std::io::stdin().read_to_string(&mut template)?;
            Ok(template)
        }
    }
}

fn unresolved_count(report: &RenderReport) -> usize {
    report.unknown.len() + report.malformed + report.skipped + usize::from(report.unterminated)
}

fn summarize(report: &RenderReport) -> String {
    let mut line = format!("substituted: {}", report.substituted);
    if !report.unknown.is_empty() {
        line.push_str(&format!(", unknown: {}", report.unknown.join(", ")));
    }
    if report.malformed > 0 {
        line.push_str(&format!(", malformed: {}", report.malformed));
    }
    if report.skipped > 0 {
        line.push_str(&format!(", skipped: {}", report.skipped));
    }
    if report.unterminated {
        line.push_str(", unterminated");
    }
    line
}
