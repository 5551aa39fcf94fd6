//! `expressions` command: lists the registered expressions.

use serde::Serialize;

use crate::cli::args::{ExpressionsArgs, OutputFormat};
use crate::error::MockExprError;
use crate::registry::ExpressionRegistry;

#[derive(Debug, Serialize)]
struct ExpressionEntry {
    identifier: &'static str,
    description: &'static str,
}

fn entries(registry: &ExpressionRegistry) -> Vec<ExpressionEntry> {
    registry
        .iter()
        .map(|expression| ExpressionEntry {
            identifier: expression.identifier(),
            description: expression.description(),
        })
        .collect()
}

/// Print every expression available under the given configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or serialized.
pub fn run(args: &ExpressionsArgs) -> Result<(), MockExprError> {
    let engine = super::load_engine(args.config.as_deref())?;
    let entries = entries(engine.registry());

    match args.format {
        OutputFormat::Human => {
            let width = entries.iter().map(|e| e.identifier.len()).max().unwrap_or(0);
            for entry in &entries {
                println!("{:<width$}  {}", entry.identifier, entry.description);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
