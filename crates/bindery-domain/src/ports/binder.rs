//! Binder seam
//!
//! The binder is how a resolved dependency context registers the way
//! its key is produced. The engine hands each context a [`Binder`]; the
//! context answers with a chain of [`BindingFunction`] calls ending in
//! a terminal `to_*` registration. The concrete sink lives in the
//! resolver crate's binding registry.

use crate::constants::DEFAULT_PRIORITY;
use crate::container::Instance;
use crate::error::Result;
use crate::key::{ComponentKey, TypeRef};
use crate::lifecycle::LifecycleType;
use crate::provider::{Provider, ProvisionContext};

/// Destination for finalized bindings.
pub trait ProviderSink {
    /// Install a provider for a key at the given priority
    fn install(&self, key: ComponentKey, priority: i32, provider: Provider) -> Result<()>;
}

/// Entry point of the binding DSL.
pub trait Binder {
    /// Start a binding for the given key
    fn bind(&self, key: ComponentKey) -> BindingFunction<'_>;
}

/// Chainable registration builder for one binding.
///
/// ## Example
///
/// ```ignore
/// binder
///     .bind(ComponentKey::of::<dyn PaymentGateway>())
///     .priority(2)
///     .lifecycle(LifecycleType::Singleton)
///     .to_type(TypeRef::of::<StripeGateway>())?;
/// ```
pub struct BindingFunction<'a> {
    sink: &'a dyn ProviderSink,
    key: ComponentKey,
    priority: i32,
    lifecycle: LifecycleType,
    lazy: bool,
}

impl<'a> BindingFunction<'a> {
    /// Binding for `key` feeding the given sink
    pub fn new(sink: &'a dyn ProviderSink, key: ComponentKey) -> Self {
        Self {
            sink,
            key,
            priority: DEFAULT_PRIORITY,
            lifecycle: LifecycleType::default(),
            lazy: false,
        }
    }

    /// Set the binding priority
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the lifecycle of produced instances
    pub fn lifecycle(mut self, lifecycle: LifecycleType) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Defer construction until first request
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Bind to a concrete type, constructed through constructor
    /// resolution when the key is requested
    pub fn to_type(self, ty: TypeRef) -> Result<()> {
        let provider = Provider::type_aware(ty, self.lifecycle, self.lazy);
        self.sink.install(self.key, self.priority, provider)
    }

    /// Bind to an opaque supplier
    pub fn to_supplier(
        self,
        supply: impl Fn(&dyn ProvisionContext) -> Result<Instance> + Send + Sync + 'static,
    ) -> Result<()> {
        let provider = Provider::supplier(self.lifecycle, self.lazy, supply);
        self.sink.install(self.key, self.priority, provider)
    }

    /// Bind to an existing instance (always singleton)
    pub fn to_instance<T: Send + Sync + 'static>(self, value: T) -> Result<()> {
        self.sink
            .install(self.key, self.priority, Provider::instance(value))
    }

    /// Bind to an already-built provider
    pub fn to_provider(self, provider: Provider) -> Result<()> {
        self.sink.install(self.key, self.priority, provider)
    }
}
