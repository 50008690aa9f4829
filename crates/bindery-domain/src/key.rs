//! Component Identity Value Objects
//!
//! A [`ComponentKey`] is the immutable, hashable identity of a bindable
//! component: a type reference plus an optional qualifier name plus a
//! scope. Strictness, collector and selection-strategy flags ride along
//! as resolution hints but never take part in equality or hashing.
//!
//! ## Business Rules
//!
//! - Two keys are equal iff their `(type, name, scope)` triple matches
//! - Hashing is consistent with equality
//! - Keys are immutable once built; all mutation happens on the builder
//! - Building a collector key rewrites the type to the collection's
//!   element type, and fails when that element type is unknown

use crate::constants::APPLICATION_SCOPE;
use crate::error::{Error, Result};
use std::any::TypeId;
use std::borrow::Cow;
use std::hash::{Hash, Hasher};

/// Erased reference to a source type.
///
/// Identity is the [`TypeId`]; the type name is carried for diagnostics
/// only. Parameterized collection types additionally carry their element
/// type so collector keys can be derived from them.
#[derive(Debug, Clone)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
    element: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Type reference for a plain (non-parameterized) type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            element: None,
        }
    }

    /// Type reference for a collection type `C` with element type `E`
    pub fn collection<C: ?Sized + 'static, E: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
            element: Some(Box::new(Self::of::<E>())),
        }
    }

    /// Type reference for a collection type whose element type could not
    /// be resolved from generic metadata (a "raw" collection)
    pub fn raw_collection<C: ?Sized + 'static>() -> Self {
        Self::of::<C>()
    }

    /// Erased identity of the referenced type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified name of the referenced type
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, for human-readable output
    pub fn simple_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    /// Element type of a parameterized collection type, if known
    pub fn element_type(&self) -> Option<&TypeRef> {
        self.element.as_deref()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Named binding scope.
///
/// Keys in different scopes are different components even when type and
/// qualifier match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeRef {
    name: Cow<'static, str>,
}

impl ScopeRef {
    /// The implicit application-wide scope
    pub fn application() -> Self {
        Self {
            name: Cow::Borrowed(APPLICATION_SCOPE),
        }
    }

    /// A named child scope
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
        }
    }

    /// Scope name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the implicit application scope
    pub fn is_application(&self) -> bool {
        self.name == APPLICATION_SCOPE
    }
}

impl Default for ScopeRef {
    fn default() -> Self {
        Self::application()
    }
}

/// Strategy used to pick one provider out of a binding hierarchy.
///
/// Resolved onto the consuming [`ComponentKey`] as a hint; the actual
/// selection happens in the resolver crate against a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Pick the provider with the highest registered priority (default)
    HighestPriority,
    /// Pick the provider at exactly this priority; never fall back
    ExactPriority(i32),
    /// Pick the highest-priority provider at or below this priority.
    /// Used for self-provision avoidance: a binding method wrapping the
    /// next-highest implementation of its own return type.
    MaximumPriority(i32),
}

/// Typed, qualifier-aware identity for a bindable component
///
/// ## Example
///
/// ```
/// use bindery_domain::key::ComponentKey;
///
/// struct AuditLog;
///
/// let plain = ComponentKey::of::<AuditLog>();
/// let named = ComponentKey::builder(bindery_domain::key::TypeRef::of::<AuditLog>())
///     .name("persistent")
///     .build()
///     .expect("key should build");
/// assert_ne!(plain, named);
/// ```
#[derive(Debug, Clone)]
pub struct ComponentKey {
    ty: TypeRef,
    name: Option<String>,
    scope: ScopeRef,
    strict: bool,
    enable: bool,
    collector: bool,
    strategy: Option<SelectionStrategy>,
}

impl ComponentKey {
    /// Start building a key for the given type
    pub fn builder(ty: TypeRef) -> ComponentKeyBuilder {
        ComponentKeyBuilder {
            ty,
            name: None,
            scope: ScopeRef::application(),
            strict: true,
            enable: true,
            collector: false,
            strategy: None,
        }
    }

    /// Unqualified application-scoped key for a type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            ty: TypeRef::of::<T>(),
            name: None,
            scope: ScopeRef::application(),
            strict: true,
            enable: true,
            collector: false,
            strategy: None,
        }
    }

    /// Unqualified application-scoped key for a type reference
    pub fn of_type(ty: TypeRef) -> Self {
        Self {
            ty,
            name: None,
            scope: ScopeRef::application(),
            strict: true,
            enable: true,
            collector: false,
            strategy: None,
        }
    }

    /// The referenced type
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    /// Qualifier name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Binding scope
    pub fn scope(&self) -> &ScopeRef {
        &self.scope
    }

    /// Whether qualifier lookups must match exactly (no unnamed fallback)
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether enable-lifecycle processing applies to this component
    pub fn is_enabled(&self) -> bool {
        self.enable
    }

    /// Whether this key matches elements of a collection
    pub fn is_collector(&self) -> bool {
        self.collector
    }

    /// Selection strategy hint, if any
    pub fn strategy(&self) -> Option<SelectionStrategy> {
        self.strategy
    }

    /// Copy of this key with the qualifier removed.
    ///
    /// Used by non-strict lookups falling back to the unnamed binding.
    pub fn unnamed(&self) -> Self {
        let mut key = self.clone();
        key.name = None;
        key
    }

    /// Copy of this key stripped to its identity triple.
    ///
    /// Hierarchies are stored under identity; hints on the consuming key
    /// must not fragment the hierarchy map.
    pub fn identity(&self) -> Self {
        Self {
            ty: self.ty.clone(),
            name: self.name.clone(),
            scope: self.scope.clone(),
            strict: true,
            enable: true,
            collector: false,
            strategy: None,
        }
    }

    /// Copy of this key carrying a selection strategy hint
    pub fn with_strategy(&self, strategy: SelectionStrategy) -> Self {
        let mut key = self.clone();
        key.strategy = Some(strategy);
        key
    }
}

impl PartialEq for ComponentKey {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.name == other.name && self.scope == other.scope
    }
}

impl Eq for ComponentKey {}

impl Hash for ComponentKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.name.hash(state);
        self.scope.hash(state);
    }
}

impl std::fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ty.simple_name())?;
        if let Some(name) = &self.name {
            write!(f, ":{name}")?;
        }
        if !self.scope.is_application() {
            write!(f, " (scope: {})", self.scope.name())?;
        }
        Ok(())
    }
}

/// Builder for [`ComponentKey`]
///
/// The builder may rewrite the type before finalizing: marking the key
/// as a collector replaces the collection type with its element type.
#[derive(Debug, Clone)]
pub struct ComponentKeyBuilder {
    ty: TypeRef,
    name: Option<String>,
    scope: ScopeRef,
    strict: bool,
    enable: bool,
    collector: bool,
    strategy: Option<SelectionStrategy>,
}

impl ComponentKeyBuilder {
    /// Set the qualifier name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Clear or set the qualifier name
    pub fn maybe_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Set the binding scope
    pub fn scope(mut self, scope: ScopeRef) -> Self {
        self.scope = scope;
        self
    }

    /// Set strict qualifier matching
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set enable-lifecycle processing
    pub fn enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// Mark the key as matching elements of a collection rather than the
    /// collection itself. The type is rewritten to the element type at
    /// build time.
    pub fn collector(mut self) -> Self {
        self.collector = true;
        self
    }

    /// Set the provider selection strategy
    pub fn strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Finalize the key.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCollectionElementType`] when the key was marked as
    /// a collector but the type carries no element type metadata.
    pub fn build(self) -> Result<ComponentKey> {
        let ty = if self.collector {
            match self.ty.element_type() {
                Some(element) => element.clone(),
                None => {
                    return Err(Error::MissingCollectionElementType {
                        type_name: self.ty.name().to_string(),
                    });
                }
            }
        } else {
            self.ty
        };
        Ok(ComponentKey {
            ty,
            name: self.name,
            scope: self.scope,
            strict: self.strict,
            enable: self.enable,
            collector: self.collector,
            strategy: self.strategy,
        })
    }
}
