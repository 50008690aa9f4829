//! Introspection facade
//!
//! The engine's only window onto type structure: declared constructors,
//! their parameters, injectable fields, and abstractness. The facade
//! replaces runtime reflection with explicit registration: metadata is
//! registered once (by hand or by a build-time generator) and queried
//! through the [`Introspector`] trait, so the engine itself carries no
//! source-language reflection dependency.

use crate::container::Instance;
use crate::error::{Error, Result};
use crate::key::{ComponentKey, SelectionStrategy, TypeRef};
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;

/// Construction callback registered alongside constructor metadata.
///
/// Receives the resolved parameter instances in declaration order and
/// returns the erased new instance. The Rust-native stand-in for a
/// reflective `newInstance` call.
pub type ConstructorFactory = Arc<dyn Fn(&[Instance]) -> Result<Instance> + Send + Sync>;

/// One declared constructor or binding-method parameter.
#[derive(Clone)]
pub struct ParameterView {
    ty: TypeRef,
    name: Option<String>,
    handled: bool,
    collector: bool,
    strategy: Option<SelectionStrategy>,
}

impl ParameterView {
    /// Plain parameter of the given type
    pub fn of(ty: TypeRef) -> Self {
        Self {
            ty,
            name: None,
            handled: false,
            collector: false,
            strategy: None,
        }
    }

    /// Attach a qualifier name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark the parameter as handled by another framework mechanism.
    /// Handled parameters are satisfied out-of-band and never become
    /// dependency edges.
    pub fn handled(mut self) -> Self {
        self.handled = true;
        self
    }

    /// Mark the parameter as a collection of components
    pub fn collector(mut self) -> Self {
        self.collector = true;
        self
    }

    /// Attach a provider selection strategy
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Parameter type
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    /// Qualifier name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the parameter is satisfied out-of-band
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Whether the parameter requests a collection of components
    pub fn is_collector(&self) -> bool {
        self.collector
    }

    /// Selection strategy hint, if any
    pub fn strategy(&self) -> Option<SelectionStrategy> {
        self.strategy
    }

    /// Dependency key this parameter resolves through
    pub fn component_key(&self) -> Result<ComponentKey> {
        let mut builder = ComponentKey::builder(self.ty.clone()).maybe_name(self.name.clone());
        if self.collector {
            builder = builder.collector();
        }
        if let Some(strategy) = self.strategy {
            builder = builder.strategy(strategy);
        }
        builder.build()
    }
}

impl std::fmt::Debug for ParameterView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterView")
            .field("type", &self.ty.simple_name())
            .field("name", &self.name)
            .field("handled", &self.handled)
            .field("collector", &self.collector)
            .finish()
    }
}

/// One injectable field or setter, a delayed dependency edge.
#[derive(Debug, Clone)]
pub struct FieldView {
    ty: TypeRef,
    name: Option<String>,
}

impl FieldView {
    /// Field of the given type
    pub fn of(ty: TypeRef) -> Self {
        Self { ty, name: None }
    }

    /// Attach a qualifier name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Field type
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    /// Dependency key this field resolves through
    pub fn component_key(&self) -> Result<ComponentKey> {
        ComponentKey::builder(self.ty.clone())
            .maybe_name(self.name.clone())
            .build()
    }
}

/// One declared constructor of a type.
#[derive(Clone)]
pub struct ConstructorView {
    owner: TypeRef,
    index: usize,
    inject: bool,
    parameters: Vec<ParameterView>,
    factory: ConstructorFactory,
}

impl ConstructorView {
    /// Type declaring this constructor
    pub fn owner(&self) -> &TypeRef {
        &self.owner
    }

    /// Position in declaration order
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the constructor carries the injection marker
    pub fn is_inject_marked(&self) -> bool {
        self.inject
    }

    /// Declared parameters in order
    pub fn parameters(&self) -> &[ParameterView] {
        &self.parameters
    }

    /// Number of declared parameters
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Invoke the registered construction callback
    pub fn instantiate(&self, arguments: &[Instance]) -> Result<Instance> {
        (self.factory)(arguments)
    }
}

impl std::fmt::Debug for ConstructorView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorView")
            .field("owner", &self.owner.simple_name())
            .field("index", &self.index)
            .field("inject", &self.inject)
            .field("parameters", &self.parameters.len())
            .finish()
    }
}

/// Facade supplying constructors, fields, and abstractness for a type.
pub trait Introspector: Send + Sync {
    /// Declared constructors of a type, in declaration order
    fn constructors_of(&self, ty: &TypeRef) -> Result<Vec<ConstructorView>>;

    /// Injectable fields of a type
    fn fields_of(&self, ty: &TypeRef) -> Result<Vec<FieldView>>;

    /// Whether the type is abstract (an interface or trait surface that
    /// cannot be constructed directly)
    fn is_abstract(&self, ty: &TypeRef) -> Result<bool>;
}

/// Registered metadata for one type.
#[derive(Clone, Default)]
struct TypeRecord {
    is_abstract: bool,
    constructors: Vec<ConstructorView>,
    fields: Vec<FieldView>,
}

/// Builder-shaped metadata registration for one type.
pub struct TypeMetadata {
    ty: TypeRef,
    record: TypeRecord,
}

impl TypeMetadata {
    /// Metadata for a concrete type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::of_type(TypeRef::of::<T>())
    }

    /// Metadata for an explicit type reference
    pub fn of_type(ty: TypeRef) -> Self {
        Self {
            ty,
            record: TypeRecord::default(),
        }
    }

    /// Mark the type as abstract
    pub fn abstract_type(mut self) -> Self {
        self.record.is_abstract = true;
        self
    }

    /// Declare the next constructor, without an injection marker
    pub fn constructor(
        self,
        parameters: Vec<ParameterView>,
        factory: ConstructorFactory,
    ) -> Self {
        self.add_constructor(false, parameters, factory)
    }

    /// Declare the next constructor, carrying the injection marker
    pub fn inject_constructor(
        self,
        parameters: Vec<ParameterView>,
        factory: ConstructorFactory,
    ) -> Self {
        self.add_constructor(true, parameters, factory)
    }

    fn add_constructor(
        mut self,
        inject: bool,
        parameters: Vec<ParameterView>,
        factory: ConstructorFactory,
    ) -> Self {
        let index = self.record.constructors.len();
        self.record.constructors.push(ConstructorView {
            owner: self.ty.clone(),
            index,
            inject,
            parameters,
            factory,
        });
        self
    }

    /// Declare an injectable field
    pub fn field(mut self, field: FieldView) -> Self {
        self.record.fields.push(field);
        self
    }
}

/// Explicit-registration backend for the introspection facade.
///
/// Thread-safe: registration and lookup go through a concurrent map so
/// parallel resolution passes can share one introspector.
#[derive(Default)]
pub struct ManualIntrospector {
    records: DashMap<TypeId, TypeRecord>,
}

impl ManualIntrospector {
    /// Empty introspector
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for a type, replacing any previous record
    pub fn register(&self, metadata: TypeMetadata) {
        self.records.insert(metadata.ty.id(), metadata.record);
    }

    /// Whether metadata exists for the type
    pub fn knows(&self, ty: &TypeRef) -> bool {
        self.records.contains_key(&ty.id())
    }

    fn record_of(&self, ty: &TypeRef) -> Result<TypeRecord> {
        self.records
            .get(&ty.id())
            .map(|record| record.clone())
            .ok_or_else(|| Error::MissingTypeMetadata {
                type_name: ty.name().to_string(),
            })
    }
}

impl Introspector for ManualIntrospector {
    fn constructors_of(&self, ty: &TypeRef) -> Result<Vec<ConstructorView>> {
        Ok(self.record_of(ty)?.constructors)
    }

    fn fields_of(&self, ty: &TypeRef) -> Result<Vec<FieldView>> {
        Ok(self.record_of(ty)?.fields)
    }

    fn is_abstract(&self, ty: &TypeRef) -> Result<bool> {
        Ok(self.record_of(ty)?.is_abstract)
    }
}
