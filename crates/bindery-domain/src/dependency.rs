//! Dependency partitions and discovered component contexts

use crate::error::{Error, Result};
use crate::key::ComponentKey;
use crate::lifecycle::LifecycleType;
use crate::ports::binder::Binder;
use serde::{Deserialize, Serialize};

/// When a dependency has to be available relative to construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyResolutionType {
    /// The consumer cannot exist without the dependency resolved first,
    /// e.g. a constructor parameter
    Immediate,
    /// The dependency may be supplied after initial construction,
    /// e.g. a field or setter injection site
    Delayed,
}

/// Partitioned set of dependency keys for one component.
///
/// Backed by insertion-ordered vectors with set semantics, so resolver
/// output and graph edges stay deterministic across runs. A key may not
/// appear in both partitions: the same dependency cannot simultaneously
/// be required before construction and deferred past it, and the
/// inconsistency is rejected when the map is built rather than silently
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct DependencyMap {
    immediate: Vec<ComponentKey>,
    delayed: Vec<ComponentKey>,
}

impl DependencyMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key to the given partition.
    ///
    /// Adding a key already present in the same partition is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDependency`] when the key is already present in
    /// the other partition.
    pub fn add(&mut self, resolution: DependencyResolutionType, key: ComponentKey) -> Result<()> {
        let (target, other, other_name) = match resolution {
            DependencyResolutionType::Immediate => {
                (&mut self.immediate, &self.delayed, "delayed")
            }
            DependencyResolutionType::Delayed => {
                (&mut self.delayed, &self.immediate, "immediate")
            }
        };
        if other.contains(&key) {
            return Err(Error::InvalidDependency {
                key: key.to_string(),
                message: format!("already declared as an {other_name} dependency"),
            });
        }
        if !target.contains(&key) {
            target.push(key);
        }
        Ok(())
    }

    /// Chainable [`DependencyMap::add`] for immediate dependencies
    pub fn immediate(mut self, key: ComponentKey) -> Result<Self> {
        self.add(DependencyResolutionType::Immediate, key)?;
        Ok(self)
    }

    /// Chainable [`DependencyMap::add`] for delayed dependencies
    pub fn delayed(mut self, key: ComponentKey) -> Result<Self> {
        self.add(DependencyResolutionType::Delayed, key)?;
        Ok(self)
    }

    /// Keys that must resolve before construction
    pub fn immediate_keys(&self) -> &[ComponentKey] {
        &self.immediate
    }

    /// Keys that may be supplied after construction
    pub fn delayed_keys(&self) -> &[ComponentKey] {
        &self.delayed
    }

    /// All keys, immediate partition first
    pub fn keys(&self) -> impl Iterator<Item = &ComponentKey> {
        self.immediate.iter().chain(self.delayed.iter())
    }

    /// Whether the key is present in either partition
    pub fn contains(&self, key: &ComponentKey) -> bool {
        self.immediate.contains(key) || self.delayed.contains(key)
    }

    /// Partition a key is declared in, if any
    pub fn resolution_of(&self, key: &ComponentKey) -> Option<DependencyResolutionType> {
        if self.immediate.contains(key) {
            Some(DependencyResolutionType::Immediate)
        } else if self.delayed.contains(key) {
            Some(DependencyResolutionType::Delayed)
        } else {
            None
        }
    }

    /// Total number of declared dependencies
    pub fn len(&self) -> usize {
        self.immediate.len() + self.delayed.len()
    }

    /// Whether no dependencies are declared
    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty() && self.delayed.is_empty()
    }
}

/// Metadata of one discovered component.
///
/// Created by a resolver when a declaration is discovered, consumed by
/// the graph builder and the configuration visitor, and discarded once
/// binding is complete. Not part of runtime state.
pub trait DependencyContext: Send + Sync {
    /// Identity of the component this context describes
    fn key(&self) -> &ComponentKey;

    /// The component's declared dependencies
    fn dependencies(&self) -> &DependencyMap;

    /// Priority of the binding this context registers
    fn priority(&self) -> i32;

    /// Lifecycle of the produced instances
    fn lifecycle(&self) -> LifecycleType;

    /// Whether construction is deferred until first request
    fn is_lazy(&self) -> bool;

    /// Register with the binder how this component's key is produced
    fn configure(&self, binder: &dyn Binder) -> Result<()>;

    /// Whether the given key must resolve before this component can be
    /// constructed
    fn needs_immediate_resolution(&self, key: &ComponentKey) -> bool {
        self.dependencies().immediate_keys().contains(key)
    }
}
