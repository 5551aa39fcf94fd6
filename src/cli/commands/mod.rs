//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod expressions;
pub mod render;
pub mod validate;
pub mod version;

use std::path::Path;

use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigLoader, EngineConfig};
use crate::error::MockExprError;
use crate::template::TemplateEngine;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), MockExprError> {
    match cli.command {
        Commands::Render(args) => render::run(&args),
        Commands::Expressions(args) => expressions::run(&args),
        Commands::Validate(args) => validate::run(&args),
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Loads the engine configuration at `path`, or the defaults when `None`.
fn load_config(path: Option<&Path>) -> Result<EngineConfig, MockExprError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let result = ConfigLoader::default().load(path)?;
    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
    tracing::info!(file = %path.display(), "configuration loaded");
    Ok(result.config)
}

/// Builds a template engine from an optional configuration file.
fn load_engine(path: Option<&Path>) -> Result<TemplateEngine, MockExprError> {
    let config = load_config(path)?;
    Ok(TemplateEngine::from_config(&config)?)
}
