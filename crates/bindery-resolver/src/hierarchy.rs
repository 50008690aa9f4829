//! Binding hierarchies and provider selection
//!
//! A hierarchy is the ordered set of competing providers for one
//! component key, keyed by integer priority. Selection picks one
//! provider per request according to the consuming key's strategy.

use bindery_domain::error::{Error, ProviderKind, Result};
use bindery_domain::key::{ComponentKey, SelectionStrategy};
use bindery_domain::provider::Provider;
use std::collections::BTreeMap;

/// Ordered mapping from priority to provider for one component key.
///
/// At most one provider exists per exact priority. Registering a second
/// provider at an occupied priority is a configuration error, never a
/// silent overwrite. The same policy applies when hierarchies from
/// different sources are merged.
#[derive(Debug, Clone)]
pub struct BindingHierarchy {
    key: ComponentKey,
    providers: BTreeMap<i32, Provider>,
}

impl BindingHierarchy {
    /// Empty hierarchy for a key
    pub fn new(key: ComponentKey) -> Self {
        Self {
            key,
            providers: BTreeMap::new(),
        }
    }

    /// The key this hierarchy serves
    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// Register a provider at a priority.
    ///
    /// # Errors
    ///
    /// [`Error::PriorityCollision`] when the priority is occupied.
    pub fn add(&mut self, priority: i32, provider: Provider) -> Result<()> {
        if self.providers.contains_key(&priority) {
            return Err(Error::PriorityCollision {
                key: self.key.to_string(),
                priority,
            });
        }
        self.providers.insert(priority, provider);
        Ok(())
    }

    /// Provider at an exact priority
    pub fn get(&self, priority: i32) -> Option<&Provider> {
        self.providers.get(&priority)
    }

    /// Greatest priority present
    pub fn highest_priority(&self) -> Option<i32> {
        self.providers.keys().next_back().copied()
    }

    /// Provider at the greatest priority present
    pub fn highest(&self) -> Option<&Provider> {
        self.providers.values().next_back()
    }

    /// Union with another hierarchy for the same key.
    ///
    /// # Errors
    ///
    /// [`Error::PriorityCollision`] when both sides occupy a priority.
    pub fn merge(mut self, other: BindingHierarchy) -> Result<Self> {
        for (priority, provider) in other.providers {
            self.add(priority, provider)?;
        }
        Ok(self)
    }

    /// Providers in ascending priority order
    pub fn providers(&self) -> impl Iterator<Item = (i32, &Provider)> {
        self.providers.iter().map(|(priority, provider)| (*priority, provider))
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Select one provider according to the strategy.
    ///
    /// - `HighestPriority` (and unset): the provider at the greatest
    ///   priority present
    /// - `ExactPriority(p)`: the provider at exactly `p`; absence is an
    ///   error, never a fallback
    /// - `MaximumPriority(p)`: the highest-priority provider at or
    ///   below `p`
    pub fn select(&self, strategy: Option<SelectionStrategy>) -> Result<&Provider> {
        let chosen = match strategy.unwrap_or(SelectionStrategy::HighestPriority) {
            SelectionStrategy::HighestPriority => self.highest(),
            SelectionStrategy::ExactPriority(priority) => self.get(priority),
            SelectionStrategy::MaximumPriority(bound) => {
                self.providers.range(..=bound).next_back().map(|(_, p)| p)
            }
        };
        chosen.ok_or_else(|| Error::NoSuchProvider {
            kind: ProviderKind::Any,
            key: self.key.to_string(),
            detail: match strategy {
                Some(SelectionStrategy::ExactPriority(priority)) => {
                    format!(" at exact priority {priority}")
                }
                Some(SelectionStrategy::MaximumPriority(bound)) => {
                    format!(" at or below priority {bound}")
                }
                _ => String::new(),
            },
        })
    }

    /// Select the type-aware provider the strategy resolves to, if the
    /// selected provider declares a concrete type.
    pub fn select_type_aware(&self, strategy: Option<SelectionStrategy>) -> Result<&Provider> {
        let provider = self.select(strategy)?;
        if provider.concrete_type().is_some() {
            Ok(provider)
        } else {
            Err(Error::NoSuchProvider {
                kind: ProviderKind::TypeAware,
                key: self.key.to_string(),
                detail: String::new(),
            })
        }
    }

    /// Select the supplier-kind provider the strategy resolves to.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchProvider`] with [`ProviderKind::NonTypeAware`]
    /// when the selected provider declares a concrete type instead of
    /// being an opaque supplier.
    pub fn select_supplier(&self, strategy: Option<SelectionStrategy>) -> Result<&Provider> {
        let provider = self.select(strategy)?;
        if provider.concrete_type().is_none() {
            Ok(provider)
        } else {
            Err(Error::NoSuchProvider {
                kind: ProviderKind::NonTypeAware,
                key: self.key.to_string(),
                detail: String::new(),
            })
        }
    }
}
