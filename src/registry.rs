//! Expression registry.
//!
//! An ordered, append-only index from identifier to [`Expression`]. Built
//! once at startup and shared read-only afterwards (`Arc` or the process-wide
//! [`ExpressionRegistry::global`]); lookups take `&self` and never allocate
//! for already upper-case identifiers.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;

use crate::error::RegistryError;
use crate::expression::{Expression, ExpressionSettings, builtin_expressions};

/// Maximum Damerau-Levenshtein distance for identifier suggestions.
const SUGGESTION_DISTANCE: usize = 3;

static GLOBAL: LazyLock<Arc<ExpressionRegistry>> = LazyLock::new(|| {
    Arc::new(
        ExpressionRegistry::builtin(&ExpressionSettings::default())
            .expect("built-in expressions have unique identifiers"),
    )
});

/// Returns `true` if `identifier` is non-empty `[A-Za-z0-9_]+`.
#[must_use]
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn canonical(identifier: &str) -> Cow<'_, str> {
    if identifier.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(identifier.to_ascii_uppercase())
    } else {
        Cow::Borrowed(identifier)
    }
}

/// Ordered collection of expressions, indexed by upper-cased identifier.
#[derive(Debug, Default)]
pub struct ExpressionRegistry {
    expressions: IndexMap<String, Box<dyn Expression>>,
}

impl ExpressionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in expressions.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] only if two built-ins collide, which
    /// indicates a programming error.
    pub fn builtin(settings: &ExpressionSettings) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for expression in builtin_expressions(settings) {
            registry.register(expression)?;
        }
        Ok(registry)
    }

    /// The process-wide registry of built-ins with default settings.
    ///
    /// Initialised on first use and never torn down.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Adds an expression.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidIdentifier`] if the identifier is not
    ///   `[A-Za-z0-9_]+`.
    /// - [`RegistryError::DuplicateRegistration`] if an existing expression
    ///   already claims the identifier, or the new expression claims an
    ///   existing one.
    pub fn register(&mut self, expression: Box<dyn Expression>) -> Result<(), RegistryError> {
        let identifier = expression.identifier();
        if !is_valid_identifier(identifier) {
            return Err(RegistryError::InvalidIdentifier {
                identifier: identifier.to_string(),
            });
        }

        if let Some(existing) = self
            .expressions
            .values()
            .find(|e| e.matches(identifier) || expression.matches(e.identifier()))
        {
            return Err(RegistryError::DuplicateRegistration {
                identifier: identifier.to_string(),
                existing: existing.identifier().to_string(),
            });
        }

        tracing::debug!(identifier, "registered expression");
        self.expressions
            .insert(identifier.to_ascii_uppercase(), expression);
        Ok(())
    }

    /// Finds the expression that claims `identifier`.
    ///
    /// Tries the index first, then asks each expression through
    /// [`Expression::matches`] so variants with aliases still resolve.
    #[must_use]
    pub fn resolve(&self, identifier: &str) -> Option<&dyn Expression> {
        if let Some(expression) = self.expressions.get(&*canonical(identifier)) {
            return Some(expression.as_ref());
        }
        self.expressions
            .values()
            .find(|e| e.matches(identifier))
            .map(AsRef::as_ref)
    }

    /// Returns `true` if some expression claims `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_some()
    }

    /// Closest registered identifier within edit distance 3, for typo hints.
    #[must_use]
    pub fn suggest(&self, identifier: &str) -> Option<&'static str> {
        let wanted = canonical(identifier);
        self.expressions
            .values()
            .map(|e| {
                let id = e.identifier();
                (id, strsim::damerau_levenshtein(&wanted, id))
            })
            .filter(|(_, dist)| *dist <= SUGGESTION_DISTANCE)
            .min_by_key(|(_, dist)| *dist)
            .map(|(id, _)| id)
    }

    /// Identifiers in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.expressions.values().map(|e| e.identifier())
    }

    /// Expressions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Expression> + '_ {
        self.expressions.values().map(AsRef::as_ref)
    }

    /// Number of registered expressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}
