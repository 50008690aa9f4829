//! Binding registry
//!
//! Concrete binder and provision engine: hierarchies of providers per
//! key, a process-wide singleton cache, contextual suppliers for
//! out-of-band parameters, and the per-call provision scope that tracks
//! the component discovery list for construction-time cycle reporting.
//!
//! Thread-safety: all shared state lives in concurrent maps. Singleton
//! memoization is compute-then-insert-if-absent: racing constructions
//! compute the same pure result and the first inserted container wins
//! and is returned to every caller thereafter.

use crate::constructor::ConstructorResolver;
use crate::graph::BindingLookup;
use crate::hierarchy::BindingHierarchy;
use bindery_domain::container::{CollectionContainer, Instance, ObjectContainer};
use bindery_domain::error::{Error, ProviderKind, Result};
use bindery_domain::key::{ComponentKey, SelectionStrategy, TypeRef};
use bindery_domain::ports::binder::{Binder, BindingFunction, ProviderSink};
use bindery_domain::ports::introspection::Introspector;
use bindery_domain::provider::{Provider, ProvisionContext};
use bindery_domain::diagnostics::{CyclePath, DiscoveryEntry};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::TypeId;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::{debug, trace};

type ContextualSupplier = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Binding registry: the binder implementation providers are registered
/// against, and the container resolving keys to object containers.
pub struct BindingRegistry {
    constructors: Arc<ConstructorResolver>,
    hierarchies: DashMap<ComponentKey, BindingHierarchy>,
    singletons: DashMap<ComponentKey, ObjectContainer>,
    contextual: DashMap<TypeId, ContextualSupplier>,
}

impl BindingRegistry {
    /// Registry backed by the given introspection facade, with a fresh
    /// constructor cache
    pub fn new(introspector: Arc<dyn Introspector>) -> Self {
        Self::with_constructors(Arc::new(ConstructorResolver::new(introspector)))
    }

    /// Registry sharing an existing constructor cache, e.g. with the
    /// managed-component resolver of the same pass
    pub fn with_constructors(constructors: Arc<ConstructorResolver>) -> Self {
        Self {
            constructors,
            hierarchies: DashMap::new(),
            singletons: DashMap::new(),
            contextual: DashMap::new(),
        }
    }

    /// Register a supplier for a parameter type handled out-of-band
    pub fn register_contextual<T: Send + Sync + 'static>(
        &self,
        supplier: impl Fn() -> T + Send + Sync + 'static,
    ) {
        self.contextual.insert(
            TypeId::of::<T>(),
            Arc::new(move || Arc::new(supplier()) as Instance),
        );
    }

    /// Snapshot of the hierarchy registered for a key
    pub fn hierarchy(&self, key: &ComponentKey) -> Option<BindingHierarchy> {
        self.hierarchies
            .get(&self.lookup_key(key))
            .map(|hierarchy| hierarchy.clone())
    }

    /// Number of keys with at least one registered provider
    pub fn len(&self) -> usize {
        self.hierarchies.len()
    }

    /// Whether no binding has been registered
    pub fn is_empty(&self) -> bool {
        self.hierarchies.is_empty()
    }

    /// Resolve a key to an object container.
    ///
    /// Opens a fresh provision scope, so the component discovery list
    /// starts empty; nested resolutions triggered by providers share
    /// the scope and feed cycle detection.
    pub fn get(&self, key: &ComponentKey) -> Result<ObjectContainer> {
        let scope = ProvisionScope::new(self);
        scope.resolve(key)
    }

    /// Typed convenience over [`BindingRegistry::get`]
    pub fn get_instance<T: Send + Sync + 'static>(&self, key: &ComponentKey) -> Result<Arc<T>> {
        let container = self.get(key)?;
        container.downcast::<T>().ok_or_else(|| {
            Error::resolution(format!(
                "instance bound for '{key}' has a different concrete type"
            ))
        })
    }

    /// Strict-mode aware hierarchy key: a non-strict qualified key with
    /// no qualified binding falls back to the unnamed binding.
    fn lookup_key(&self, key: &ComponentKey) -> ComponentKey {
        if key.name().is_some()
            && !key.is_strict()
            && !self.hierarchies.contains_key(&key.identity())
        {
            return key.unnamed();
        }
        key.clone()
    }

    /// Concrete type an explicit binding satisfies this key with
    fn implemented_type(&self, key: &ComponentKey) -> Option<TypeRef> {
        let hierarchy = self.hierarchies.get(key)?;
        let provider = hierarchy.select(key.strategy()).ok()?;
        provider.concrete_type().cloned()
    }

    fn resolve_scoped(
        &self,
        scope: &ProvisionScope<'_>,
        key: &ComponentKey,
    ) -> Result<ObjectContainer> {
        if key.is_collector() {
            return self.resolve_collection(scope, key);
        }

        // The singleton cache is keyed by identity alone, while a
        // strategy hint targets one specific provider in the hierarchy.
        // Only default-selection requests may use the cache.
        let default_selection = matches!(
            key.strategy(),
            None | Some(SelectionStrategy::HighestPriority)
        );
        if default_selection {
            if let Some(cached) = self.singletons.get(key) {
                trace!(component = %key, "singleton cache hit");
                return Ok(cached.clone());
            }
        }

        // Clone the provider out so no map guard is held during
        // provision, which may re-enter the registry.
        let provider = {
            let hierarchy = self.hierarchies.get(key).ok_or_else(|| Error::NoSuchProvider {
                kind: ProviderKind::Any,
                key: key.to_string(),
                detail: String::new(),
            })?;
            hierarchy.select(key.strategy())?.clone()
        };

        let container = provider.provide(scope)?;
        if default_selection
            && provider.default_lifecycle().is_singleton()
            && container.is_cacheable()
        {
            return Ok(match self.singletons.entry(key.clone()) {
                Entry::Occupied(existing) => existing.get().clone(),
                Entry::Vacant(vacant) => {
                    vacant.insert(container.clone());
                    container
                }
            });
        }
        Ok(container)
    }

    /// A collector key gathers every provider registered for the
    /// element key into one collection container. Caching happens here
    /// at the collection level; the entries themselves are never cached.
    fn resolve_collection(
        &self,
        scope: &ProvisionScope<'_>,
        key: &ComponentKey,
    ) -> Result<ObjectContainer> {
        let providers: Vec<Provider> = self
            .hierarchies
            .get(&key.identity())
            .map(|hierarchy| {
                hierarchy
                    .providers()
                    .map(|(_, provider)| provider.clone())
                    .collect()
            })
            .unwrap_or_default();

        let mut members = Vec::with_capacity(providers.len());
        for provider in providers {
            members.push(provider.provide(scope)?.into_entry());
        }
        debug!(component = %key, members = members.len(), "resolved component collection");
        Ok(ObjectContainer::Collection(CollectionContainer::new(members)))
    }

    fn construct_scoped(&self, scope: &ProvisionScope<'_>, ty: &TypeRef) -> Result<Instance> {
        let key = ComponentKey::of_type(ty.clone());
        let bound_target = self
            .implemented_type(&key)
            .filter(|target| target != ty);
        let constructor = self
            .constructors
            .find_constructor(ty, bound_target.as_ref())?
            .ok_or_else(|| Error::MissingInjectConstructor {
                type_name: ty.name().to_string(),
            })?;

        let mut arguments: Vec<Instance> = Vec::with_capacity(constructor.parameter_count());
        for parameter in constructor.parameters() {
            let argument = if parameter.is_handled() {
                scope.contextual(parameter.type_ref())?
            } else {
                scope.resolve(&parameter.component_key()?)?.instance()
            };
            arguments.push(argument);
        }
        constructor.instantiate(&arguments)
    }

    fn discovery_path(&self, keys: &[ComponentKey]) -> CyclePath {
        CyclePath::from_entries(keys.iter().map(|key| {
            match self.implemented_by(key) {
                Some(actual) => {
                    DiscoveryEntry::implemented_by(key.type_ref().simple_name(), actual)
                }
                None => DiscoveryEntry::new(key.type_ref().simple_name()),
            }
        }))
    }
}

impl ProviderSink for BindingRegistry {
    fn install(&self, key: ComponentKey, priority: i32, provider: Provider) -> Result<()> {
        debug!(component = %key, priority, "installing provider");
        let identity = key.identity();
        let mut hierarchy = self
            .hierarchies
            .entry(identity.clone())
            .or_insert_with(|| BindingHierarchy::new(identity));
        hierarchy.add(priority, provider)
    }
}

impl Binder for BindingRegistry {
    fn bind(&self, key: ComponentKey) -> BindingFunction<'_> {
        BindingFunction::new(self, key)
    }
}

impl BindingLookup for BindingRegistry {
    fn implemented_by(&self, key: &ComponentKey) -> Option<String> {
        self.implemented_type(key)
            .filter(|target| target != key.type_ref())
            .map(|target| target.simple_name().to_string())
    }
}

/// Per-call provision scope.
///
/// Carries the component discovery list: the stack of keys currently
/// being provisioned. Re-entering an in-flight key is a construction
/// cycle no memoization can break, and raises
/// [`Error::CyclicDependency`] with the reconstructed path.
struct ProvisionScope<'r> {
    registry: &'r BindingRegistry,
    // Provision is synchronous on the calling thread; the stack never
    // crosses threads.
    stack: RefCell<Vec<ComponentKey>>,
}

impl<'r> ProvisionScope<'r> {
    fn new(registry: &'r BindingRegistry) -> Self {
        Self {
            registry,
            stack: RefCell::new(Vec::new()),
        }
    }
}

impl ProvisionContext for ProvisionScope<'_> {
    fn resolve(&self, key: &ComponentKey) -> Result<ObjectContainer> {
        let key = self.registry.lookup_key(key);

        {
            // Strategy rides along in the comparison: a self-delegating
            // binding re-enters its own key aimed at a lower priority,
            // which targets a different provider and is not a cycle.
            let stack = self.stack.borrow();
            if let Some(position) = stack
                .iter()
                .position(|entry| *entry == key && entry.strategy() == key.strategy())
            {
                let path = self.registry.discovery_path(&stack[position..]);
                return Err(Error::CyclicDependency { path });
            }
        }

        self.stack.borrow_mut().push(key.clone());
        let result = self.registry.resolve_scoped(self, &key);
        self.stack.borrow_mut().pop();
        result
    }

    fn construct(&self, ty: &TypeRef) -> Result<Instance> {
        self.registry.construct_scoped(self, ty)
    }

    fn contextual(&self, ty: &TypeRef) -> Result<Instance> {
        let supplier = self.registry.contextual.get(&ty.id()).ok_or_else(|| {
            Error::resolution(format!(
                "no contextual supplier registered for handled parameter '{}'",
                ty.name()
            ))
        })?;
        Ok(supplier.value()())
    }
}
