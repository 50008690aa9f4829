//! Declaration sources consumed by resolvers
//!
//! These value objects are what the scanning collaborator hands the
//! engine: managed component declarations and explicit binding-method
//! declarations. Resolvers turn them into dependency contexts.

use crate::constants::DEFAULT_PRIORITY;
use crate::error::Result;
use crate::key::{ComponentKey, ScopeRef, TypeRef};
use crate::lifecycle::LifecycleType;
use crate::ports::introspection::{ConstructorFactory, ParameterView};

/// Declaration of one managed component.
#[derive(Debug, Clone)]
pub struct ComponentRegistration {
    ty: TypeRef,
    name: Option<String>,
    scope: ScopeRef,
    lifecycle: LifecycleType,
    lazy: bool,
    priority: i32,
}

impl ComponentRegistration {
    /// Declaration for a concrete type with defaults: application
    /// scope, prototype lifecycle, eager, default priority
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::of_type(TypeRef::of::<T>())
    }

    /// Declaration for an explicit type reference
    pub fn of_type(ty: TypeRef) -> Self {
        Self {
            ty,
            name: None,
            scope: ScopeRef::application(),
            lifecycle: LifecycleType::default(),
            lazy: false,
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Attach a qualifier name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the binding scope
    pub fn scoped(mut self, scope: ScopeRef) -> Self {
        self.scope = scope;
        self
    }

    /// Set the lifecycle
    pub fn lifecycle(mut self, lifecycle: LifecycleType) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Shorthand for a singleton declaration
    pub fn singleton(self) -> Self {
        self.lifecycle(LifecycleType::Singleton)
    }

    /// Defer construction until first request
    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Set the binding priority
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Declared type
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    /// Declared lifecycle
    pub fn lifecycle_type(&self) -> LifecycleType {
        self.lifecycle
    }

    /// Whether construction is deferred
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// Declared priority
    pub fn priority_value(&self) -> i32 {
        self.priority
    }

    /// Component key this declaration produces
    pub fn component_key(&self) -> Result<ComponentKey> {
        ComponentKey::builder(self.ty.clone())
            .maybe_name(self.name.clone())
            .scope(self.scope.clone())
            .build()
    }
}

/// Declaration of one explicit binding method.
///
/// The produced key derives from the declared binding name and return
/// type; the dependency set derives from the parameters. The factory is
/// the method body.
#[derive(Clone)]
pub struct BindsMethodRegistration {
    name: Option<String>,
    return_type: TypeRef,
    scope: ScopeRef,
    lifecycle: LifecycleType,
    lazy: bool,
    priority: i32,
    parameters: Vec<ParameterView>,
    factory: ConstructorFactory,
}

impl BindsMethodRegistration {
    /// Binding method producing the given return type
    pub fn new(return_type: TypeRef, factory: ConstructorFactory) -> Self {
        Self {
            name: None,
            return_type,
            scope: ScopeRef::application(),
            lifecycle: LifecycleType::default(),
            lazy: false,
            priority: DEFAULT_PRIORITY,
            parameters: Vec::new(),
            factory,
        }
    }

    /// Attach the declared binding name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the binding scope
    pub fn scoped(mut self, scope: ScopeRef) -> Self {
        self.scope = scope;
        self
    }

    /// Set the lifecycle
    pub fn lifecycle(mut self, lifecycle: LifecycleType) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Shorthand for a singleton binding
    pub fn singleton(self) -> Self {
        self.lifecycle(LifecycleType::Singleton)
    }

    /// Defer construction until first request
    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Set the binding priority
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Declare the next method parameter
    pub fn parameter(mut self, parameter: ParameterView) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Declared return type
    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    /// Declared lifecycle
    pub fn lifecycle_type(&self) -> LifecycleType {
        self.lifecycle
    }

    /// Whether construction is deferred
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// Declared priority
    pub fn priority_value(&self) -> i32 {
        self.priority
    }

    /// Declared parameters in order
    pub fn parameters(&self) -> &[ParameterView] {
        &self.parameters
    }

    /// The method body
    pub fn factory(&self) -> ConstructorFactory {
        self.factory.clone()
    }

    /// Component key this binding method produces
    pub fn binding_key(&self) -> Result<ComponentKey> {
        ComponentKey::builder(self.return_type.clone())
            .maybe_name(self.name.clone())
            .scope(self.scope.clone())
            .build()
    }
}

impl std::fmt::Debug for BindsMethodRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindsMethodRegistration")
            .field("name", &self.name)
            .field("return_type", &self.return_type.simple_name())
            .field("priority", &self.priority)
            .field("parameters", &self.parameters.len())
            .finish()
    }
}

/// Union over the declaration source kinds resolvers consume.
#[derive(Debug, Clone)]
pub enum DeclarationSource {
    /// A managed component declaration
    Component(ComponentRegistration),
    /// An explicit binding-method declaration
    BindsMethod(BindsMethodRegistration),
}

impl From<ComponentRegistration> for DeclarationSource {
    fn from(registration: ComponentRegistration) -> Self {
        Self::Component(registration)
    }
}

impl From<BindsMethodRegistration> for DeclarationSource {
    fn from(registration: BindsMethodRegistration) -> Self {
        Self::BindsMethod(registration)
    }
}
