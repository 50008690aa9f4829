//! Error handling types

use crate::diagnostics::CyclePath;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Provider categories a hierarchy lookup can demand.
///
/// Used by [`Error::NoSuchProvider`] to say what kind of provider the
/// selection strategy required but could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// A provider that knows the concrete type it constructs
    TypeAware,
    /// An opaque supplier without a declared concrete type
    NonTypeAware,
    /// Any provider at all
    Any,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeAware => write!(f, "type-aware"),
            Self::NonTypeAware => write!(f, "non-type-aware"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// Main error type for the binding engine
///
/// Resolution and graph-building errors abort the entire bootstrap pass:
/// a graph with unresolved cycles or missing constructors must not
/// produce a half-wired container. Missing (non-cyclic) dependencies are
/// the softer condition and travel in a
/// [`ValidationReport`](crate::diagnostics::ValidationReport) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A resolver could not turn a declaration into a dependency context
    #[error("Dependency resolution failed: {message}")]
    Resolution {
        /// Description of the resolution failure
        message: String,
        /// Optional underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A concrete type has no constructor eligible for injection
    #[error("No injectable constructor found for type '{type_name}'")]
    MissingInjectConstructor {
        /// The type that could not be constructed
        type_name: String,
    },

    /// A binding hierarchy lookup found no provider matching the
    /// requested selection strategy
    #[error("No {kind} provider for key '{key}'{detail}")]
    NoSuchProvider {
        /// The provider category the lookup required
        kind: ProviderKind,
        /// Rendered component key that was requested
        key: String,
        /// Extra context, e.g. the priority that had no provider
        detail: String,
    },

    /// Traversal or provision detected a disallowed dependency cycle
    #[error("{path}")]
    CyclicDependency {
        /// The full discovery path closing the cycle
        path: CyclePath,
    },

    /// Registering a resolved context with the binder failed
    #[error("Failed to configure component '{key}': {message}")]
    ComponentConfiguration {
        /// Rendered component key being configured
        key: String,
        /// Description of the configuration failure
        message: String,
    },

    /// A collector key's element type could not be determined
    #[error("Cannot build collector key for '{type_name}': element type is unknown")]
    MissingCollectionElementType {
        /// The collection type missing generic element metadata
        type_name: String,
    },

    /// Two providers were registered at the same explicit priority
    #[error("Duplicate provider at priority {priority} for key '{key}'")]
    PriorityCollision {
        /// Rendered component key of the hierarchy
        key: String,
        /// The colliding priority
        priority: i32,
    },

    /// A dependency declaration is internally inconsistent
    #[error("Invalid dependency declaration for '{key}': {message}")]
    InvalidDependency {
        /// Rendered component key of the offending dependency
        key: String,
        /// Description of the inconsistency
        message: String,
    },

    /// The introspection facade has no metadata registered for a type
    #[error("No type metadata registered for '{type_name}'")]
    MissingTypeMetadata {
        /// The type the introspector was asked about
        type_name: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Resolution`] without an underlying cause
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a [`Error::ComponentConfiguration`]
    pub fn configuration(key: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self::ComponentConfiguration {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
