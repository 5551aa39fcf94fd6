//! `mockexpr` - dynamic response expressions for mock API servers
//!
//! Mock response bodies are authored as templates containing placeholders
//! such as `${RANDOM_DATE}` or `${RANDOM_INTEGER(min=1, max=10)}`. Each
//! render replaces every placeholder with a freshly generated value:
//!
//! ```
//! let body = mockexpr::render(r#"{"id": "${RANDOM_UUID}", "ok": true}"#);
//! assert!(!body.contains("${"));
//! ```
//!
//! Placeholders that cannot be expanded are left in the output unchanged,
//! so rendering never fails.

pub mod cli;
pub mod config;
pub mod error;
pub mod expression;
pub mod observability;
pub mod registry;
pub mod template;

pub use config::EngineConfig;
pub use error::{MockExprError, RegistryError, Result};
pub use expression::{Expression, ExpressionArgument, ExpressionInput};
pub use registry::ExpressionRegistry;
pub use template::{RenderReport, Rendered, TemplateEngine, render};
