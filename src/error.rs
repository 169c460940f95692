//! Error types for the dependency injection container.

use std::fmt;

/// Dependency injection errors.
///
/// `NotFound` is the only exceptional outcome a correctly configured
/// application observes: no registration for the requested key is
/// reachable from the calling scope up through the root. Callers that
/// expect absence should prefer `get_optional` over matching on it.
///
/// # Examples
///
/// ```rust
/// use strata_di::{DiError, ServiceCollection, Resolver};
///
/// let root = ServiceCollection::new().build();
/// match root.get::<String>() {
///     Err(DiError::NotFound(name)) => assert!(name.contains("String")),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// No registration for the key is reachable from the calling scope.
    NotFound(&'static str),
    /// A resolved instance failed to downcast to the requested type.
    TypeMismatch(&'static str),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound(name) => write!(f, "Service not found: {}", name),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for DI operations.
pub type DiResult<T> = Result<T, DiError>;
