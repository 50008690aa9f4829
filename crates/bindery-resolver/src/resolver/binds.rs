//! Binding-method resolver
//!
//! Scans explicit binding-method declarations, derives the produced key
//! from the declared binding name and return type, and the dependency
//! set from the parameters. A parameter of the method's own return type
//! is the self-type delegate pattern: it resolves to the next provider
//! below the method's priority instead of recursing into the binding
//! being registered.

use super::DependencyResolver;
use bindery_domain::declaration::{BindsMethodRegistration, DeclarationSource};
use bindery_domain::dependency::{DependencyContext, DependencyMap, DependencyResolutionType};
use bindery_domain::error::Result;
use bindery_domain::key::{ComponentKey, SelectionStrategy, TypeRef};
use bindery_domain::lifecycle::LifecycleType;
use bindery_domain::ports::binder::Binder;
use bindery_domain::ports::introspection::ConstructorFactory;
use std::sync::Arc;
use tracing::debug;

/// Resolver for explicit binding-method declarations.
#[derive(Default)]
pub struct BindsMethodResolver;

impl BindsMethodResolver {
    /// Stateless resolver
    pub fn new() -> Self {
        Self
    }

    fn resolve_method(
        &self,
        registration: &BindsMethodRegistration,
    ) -> Result<Arc<dyn DependencyContext>> {
        let key = registration.binding_key()?;
        let mut dependencies = DependencyMap::new();
        let mut plans = Vec::with_capacity(registration.parameters().len());

        for parameter in registration.parameters() {
            if parameter.is_handled() {
                plans.push(ParameterPlan::Contextual(parameter.type_ref().clone()));
                continue;
            }
            let parameter_key = parameter.component_key()?;
            if parameter_key == key {
                // Self-type delegate: resolve against the next provider
                // at or below the shadowed priority. No graph edge; the
                // delegation target shares this key.
                let bound = registration.priority_value().saturating_sub(1);
                plans.push(ParameterPlan::Resolve(
                    parameter_key.with_strategy(SelectionStrategy::MaximumPriority(bound)),
                ));
                continue;
            }
            dependencies.add(DependencyResolutionType::Immediate, parameter_key.clone())?;
            plans.push(ParameterPlan::Resolve(parameter_key));
        }

        debug!(binding = %key, priority = registration.priority_value(), "resolved binding method");
        Ok(Arc::new(BindsMethodContext {
            key,
            dependencies,
            priority: registration.priority_value(),
            lifecycle: registration.lifecycle_type(),
            lazy: registration.is_lazy(),
            plans: Arc::new(plans),
            factory: registration.factory(),
        }))
    }
}

impl DependencyResolver for BindsMethodResolver {
    fn resolve(&self, sources: &[DeclarationSource]) -> Result<Vec<Arc<dyn DependencyContext>>> {
        let mut contexts: Vec<Arc<dyn DependencyContext>> = Vec::new();
        for source in sources {
            if let DeclarationSource::BindsMethod(registration) = source {
                contexts.push(self.resolve_method(registration)?);
            }
        }
        Ok(contexts)
    }
}

/// How one method parameter is supplied at provision time.
enum ParameterPlan {
    /// Resolved through the container
    Resolve(ComponentKey),
    /// Satisfied out-of-band
    Contextual(TypeRef),
}

/// Context for one binding method: binds its key to a supplier that
/// resolves the method parameters and invokes the method body.
struct BindsMethodContext {
    key: ComponentKey,
    dependencies: DependencyMap,
    priority: i32,
    lifecycle: LifecycleType,
    lazy: bool,
    plans: Arc<Vec<ParameterPlan>>,
    factory: ConstructorFactory,
}

impl DependencyContext for BindsMethodContext {
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
        let plans = Arc::clone(&self.plans);
        let factory = self.factory.clone();
        binder
            .bind(self.key.identity())
            .priority(self.priority)
            .lifecycle(self.lifecycle)
            .lazy(self.lazy)
            .to_supplier(move |context| {
                let mut arguments = Vec::with_capacity(plans.len());
                for plan in plans.iter() {
                    let argument = match plan {
                        ParameterPlan::Resolve(key) => context.resolve(key)?.instance(),
                        ParameterPlan::Contextual(ty) => context.contextual(ty)?,
                    };
                    arguments.push(argument);
                }
                factory(&arguments)
            })
    }
}
