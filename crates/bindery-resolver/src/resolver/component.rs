//! Managed-component resolver
//!
//! For each managed component declaration, looks up the optimal
//! constructor and emits one context whose immediate dependencies are
//! the constructor's non-handled parameters and whose delayed
//! dependencies are the injectable fields. Handled parameters are
//! satisfied out-of-band and never become dependency edges.

use super::DependencyResolver;
use crate::constructor::ConstructorResolver;
use bindery_domain::declaration::{ComponentRegistration, DeclarationSource};
use bindery_domain::dependency::{DependencyContext, DependencyMap, DependencyResolutionType};
use bindery_domain::error::Result;
use bindery_domain::key::{ComponentKey, TypeRef};
use bindery_domain::lifecycle::LifecycleType;
use bindery_domain::ports::binder::Binder;
use std::sync::Arc;
use tracing::debug;

/// Resolver for managed component declarations.
pub struct ManagedComponentResolver {
    constructors: Arc<ConstructorResolver>,
}

impl ManagedComponentResolver {
    /// Resolver backed by the given constructor resolution
    pub fn new(constructors: Arc<ConstructorResolver>) -> Self {
        Self { constructors }
    }

    fn resolve_component(
        &self,
        registration: &ComponentRegistration,
    ) -> Result<Arc<dyn DependencyContext>> {
        let key = registration.component_key()?;
        let mut dependencies = DependencyMap::new();

        // Constructor parameters are immediate: the component cannot
        // exist until they resolve.
        let constructor = self
            .constructors
            .find_constructor(registration.type_ref(), None)?;
        if let Some(constructor) = &constructor {
            for parameter in constructor.parameters() {
                if parameter.is_handled() {
                    continue;
                }
                dependencies.add(
                    DependencyResolutionType::Immediate,
                    parameter.component_key()?,
                )?;
            }
        }

        // Injectable fields are delayed: they may be populated after
        // initial construction.
        for field in self
            .constructors
            .introspector()
            .fields_of(registration.type_ref())?
        {
            dependencies.add(DependencyResolutionType::Delayed, field.component_key()?)?;
        }

        debug!(
            component = %key,
            immediate = dependencies.immediate_keys().len(),
            delayed = dependencies.delayed_keys().len(),
            "resolved managed component"
        );
        Ok(Arc::new(ManagedComponentContext {
            key,
            concrete_type: registration.type_ref().clone(),
            dependencies,
            priority: registration.priority_value(),
            lifecycle: registration.lifecycle_type(),
            lazy: registration.is_lazy(),
        }))
    }
}

impl DependencyResolver for ManagedComponentResolver {
    fn resolve(&self, sources: &[DeclarationSource]) -> Result<Vec<Arc<dyn DependencyContext>>> {
        let mut contexts: Vec<Arc<dyn DependencyContext>> = Vec::new();
        for source in sources {
            if let DeclarationSource::Component(registration) = source {
                contexts.push(self.resolve_component(registration)?);
            }
        }
        Ok(contexts)
    }
}

/// Context for one managed component: binds its key to a context-driven
/// provider of the declared concrete type.
struct ManagedComponentContext {
    key: ComponentKey,
    concrete_type: TypeRef,
    dependencies: DependencyMap,
    priority: i32,
    lifecycle: LifecycleType,
    lazy: bool,
}

impl DependencyContext for ManagedComponentContext {
    fn key(&self) -> &ComponentKey {
        &self.key
    }

    fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn lifecycle(&self) -> LifecycleType {
        self.lifecycle
    }

    fn is_lazy(&self) -> bool {
        self.lazy
    }

    fn configure(&self, binder: &dyn Binder) -> Result<()> {
        binder
            .bind(self.key.identity())
            .priority(self.priority)
            .lifecycle(self.lifecycle)
            .lazy(self.lazy)
            .to_type(self.concrete_type.clone())
    }
}
