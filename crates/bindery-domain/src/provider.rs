//! Provider variants
//!
//! A provider is the strategy object that produces an instance (or a
//! container of instances) for one component key. The variant set is
//! closed by design: composing new behavior happens by wrapping a
//! provider in [`Provider::Composed`], never by subclassing.

use crate::container::{Instance, ObjectContainer};
use crate::error::Result;
use crate::key::{ComponentKey, TypeRef};
use crate::lifecycle::LifecycleType;
use std::sync::Arc;

/// Supplier callback for non-type-aware providers
pub type SupplyFn = Arc<dyn Fn(&dyn ProvisionContext) -> Result<Instance> + Send + Sync>;

/// Post-processing transform applied to a produced container
pub type TransformFn =
    Arc<dyn Fn(&dyn ProvisionContext, ObjectContainer) -> Result<ObjectContainer> + Send + Sync>;

/// Seam through which providers reach back into the container.
///
/// Implemented by the registry's provision scope in the resolver crate;
/// providers stay free of any registry dependency.
pub trait ProvisionContext {
    /// Resolve a dependency key to a container
    fn resolve(&self, key: &ComponentKey) -> Result<ObjectContainer>;

    /// Construct an instance of a concrete type through constructor
    /// resolution
    fn construct(&self, ty: &TypeRef) -> Result<Instance>;

    /// Supply a parameter that is handled out-of-band by another
    /// framework mechanism (e.g. context injection) rather than through
    /// a binding
    fn contextual(&self, ty: &TypeRef) -> Result<Instance>;
}

/// Context-driven provider that knows the concrete type to construct
#[derive(Debug, Clone)]
pub struct TypeAwareProvider {
    ty: TypeRef,
    lifecycle: LifecycleType,
    lazy: bool,
}

impl TypeAwareProvider {
    /// Provider constructing the given concrete type
    pub fn new(ty: TypeRef, lifecycle: LifecycleType, lazy: bool) -> Self {
        Self { ty, lifecycle, lazy }
    }

    /// The concrete type this provider constructs
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }
}

/// Opaque supplier provider without a declared concrete type
#[derive(Clone)]
pub struct SupplierProvider {
    supply: SupplyFn,
    lifecycle: LifecycleType,
    lazy: bool,
}

impl SupplierProvider {
    /// Provider delegating to the given supplier
    pub fn new(supply: SupplyFn, lifecycle: LifecycleType, lazy: bool) -> Self {
        Self { supply, lifecycle, lazy }
    }
}

/// Decorator wrapping another provider plus an ordered chain of
/// post-processing transforms over the produced container
#[derive(Clone)]
pub struct ComposedProvider {
    inner: Box<Provider>,
    transforms: Vec<TransformFn>,
}

impl ComposedProvider {
    /// Wrap a provider with a transform chain
    pub fn new(inner: Provider, transforms: Vec<TransformFn>) -> Self {
        Self {
            inner: Box::new(inner),
            transforms,
        }
    }

    /// The wrapped provider
    pub fn inner(&self) -> &Provider {
        &self.inner
    }
}

/// Strategy object that produces an instance for a component key.
///
/// Closed variant set: type-aware (context-driven construction), opaque
/// supplier, and the composed decorator.
#[derive(Clone)]
pub enum Provider {
    /// Knows the concrete type to construct
    TypeAware(TypeAwareProvider),
    /// Opaque supplier
    Supplier(SupplierProvider),
    /// Wrapped provider plus post-processing transforms
    Composed(ComposedProvider),
}

impl Provider {
    /// Context-driven provider for a concrete type
    pub fn type_aware(ty: TypeRef, lifecycle: LifecycleType, lazy: bool) -> Self {
        Self::TypeAware(TypeAwareProvider::new(ty, lifecycle, lazy))
    }

    /// Supplier provider over a closure
    pub fn supplier(
        lifecycle: LifecycleType,
        lazy: bool,
        supply: impl Fn(&dyn ProvisionContext) -> Result<Instance> + Send + Sync + 'static,
    ) -> Self {
        Self::Supplier(SupplierProvider::new(Arc::new(supply), lifecycle, lazy))
    }

    /// Singleton provider over an existing instance
    pub fn instance<T: Send + Sync + 'static>(value: T) -> Self {
        let shared: Instance = Arc::new(value);
        Self::supplier(LifecycleType::Singleton, false, move |_| Ok(Arc::clone(&shared)))
    }

    /// Wrap this provider with a post-processing transform chain
    pub fn composed(self, transforms: Vec<TransformFn>) -> Self {
        Self::Composed(ComposedProvider::new(self, transforms))
    }

    /// Produce a container for the key this provider is bound to
    pub fn provide(&self, context: &dyn ProvisionContext) -> Result<ObjectContainer> {
        match self {
            Self::TypeAware(provider) => {
                let instance = context.construct(&provider.ty)?;
                Ok(ObjectContainer::from_instance(instance))
            }
            Self::Supplier(provider) => {
                let instance = (provider.supply)(context)?;
                Ok(ObjectContainer::from_instance(instance))
            }
            Self::Composed(provider) => {
                let mut container = provider.inner.provide(context)?;
                for transform in &provider.transforms {
                    container = transform(context, container)?;
                }
                Ok(container)
            }
        }
    }

    /// Concrete type this provider constructs, if declared.
    /// Composed providers delegate to the wrapped provider.
    pub fn concrete_type(&self) -> Option<&TypeRef> {
        match self {
            Self::TypeAware(provider) => Some(&provider.ty),
            Self::Supplier(_) => None,
            Self::Composed(provider) => provider.inner.concrete_type(),
        }
    }

    /// Lifecycle hint declared by the provider
    pub fn default_lifecycle(&self) -> LifecycleType {
        match self {
            Self::TypeAware(provider) => provider.lifecycle,
            Self::Supplier(provider) => provider.lifecycle,
            Self::Composed(provider) => provider.inner.default_lifecycle(),
        }
    }

    /// Laziness hint declared by the provider
    pub fn default_laziness(&self) -> bool {
        match self {
            Self::TypeAware(provider) => provider.lazy,
            Self::Supplier(provider) => provider.lazy,
            Self::Composed(provider) => provider.inner.default_laziness(),
        }
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeAware(provider) => f
                .debug_struct("TypeAwareProvider")
                .field("type", &provider.ty.simple_name())
                .field("lifecycle", &provider.lifecycle)
                .finish(),
            Self::Supplier(provider) => f
                .debug_struct("SupplierProvider")
                .field("lifecycle", &provider.lifecycle)
                .finish_non_exhaustive(),
            Self::Composed(provider) => f
                .debug_struct("ComposedProvider")
                .field("inner", &provider.inner)
                .field("transforms", &provider.transforms.len())
                .finish(),
        }
    }
}
