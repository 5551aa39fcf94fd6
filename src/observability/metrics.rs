//! Render metrics.
//!
//! Measurements go through the `metrics` facade and are no-ops until a
//! recorder is installed. [`init_metrics`] installs a Prometheus recorder
//! without an HTTP listener; callers read it through the returned handle.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::error::MockExprError;

/// Label used when a placeholder did not resolve to a registered expression.
///
/// Identifiers come from user-authored templates, so only registered
/// identifiers are ever used as label values.
pub const UNKNOWN_LABEL: &str = "__unknown__";

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// How a placeholder was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderOutcome {
    /// Replaced with a generated value.
    Substituted,
    /// Identifier not registered.
    Unknown,
    /// Body did not parse.
    Malformed,
    /// Left raw after the expansion limit.
    Skipped,
}

impl PlaceholderOutcome {
    /// Label value for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Substituted => "substituted",
            Self::Unknown => "unknown",
            Self::Malformed => "malformed",
            Self::Skipped => "skipped",
        }
    }
}

/// Installs the global Prometheus recorder and returns its handle.
///
/// Subsequent calls return the handle installed by the first.
///
/// # Errors
///
/// Returns `MockExprError::Io` if another recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, MockExprError> {
    if let Some(handle) = HANDLE.get() {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MockExprError::Io(std::io::Error::other(e.to_string())))?;
    describe_metrics();
    Ok(HANDLE.get_or_init(|| handle).clone())
}

fn describe_metrics() {
    describe_counter!("mockexpr_renders_total", "Total number of templates rendered");
    describe_counter!(
        "mockexpr_placeholders_total",
        "Placeholders encountered, by expression and outcome"
    );
    describe_histogram!(
        "mockexpr_render_duration_us",
        "Template render duration in microseconds"
    );
}

/// Records one completed render.
pub fn record_render(duration: Duration) {
    counter!("mockexpr_renders_total").increment(1);
    histogram!("mockexpr_render_duration_us").record(duration.as_secs_f64() * 1_000_000.0);
}

/// Records one placeholder. `expression` is the canonical identifier of the
/// resolved expression, if any.
pub fn record_placeholder(expression: Option<&'static str>, outcome: PlaceholderOutcome) {
    counter!(
        "mockexpr_placeholders_total",
        "expression" => expression.unwrap_or(UNKNOWN_LABEL),
        "outcome" => outcome.as_str(),
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        assert_eq!(PlaceholderOutcome::Substituted.as_str(), "substituted");
        assert_eq!(PlaceholderOutcome::Unknown.as_str(), "unknown");
        assert_eq!(PlaceholderOutcome::Malformed.as_str(), "malformed");
        assert_eq!(PlaceholderOutcome::Skipped.as_str(), "skipped");
    }

    #[test]
    fn recorded_metrics_appear_in_snapshot() {
        let handle = init_metrics().unwrap();
        record_render(Duration::from_micros(42));
        record_placeholder(Some("RANDOM_UUID"), PlaceholderOutcome::Substituted);
        record_placeholder(None, PlaceholderOutcome::Unknown);

        let snapshot = handle.render();
        assert!(snapshot.contains("mockexpr_renders_total"), "{snapshot}");
        assert!(snapshot.contains(r#"expression="RANDOM_UUID""#), "{snapshot}");
        assert!(snapshot.contains(r#"expression="__unknown__""#), "{snapshot}");

        let again = init_metrics().unwrap();
        assert!(again.render().contains("mockexpr_renders_total"));
    }
}
