//! Optimal constructor selection
//!
//! Chooses the constructor to instantiate a concrete type with: the
//! injectable constructor with the greatest parameter count, ties
//! broken by declaration order. Selection is a pure function of type
//! metadata, so results are cached process-wide in a concurrent map;
//! racing inserts compute the same value and are harmless.

use bindery_domain::error::{Error, Result};
use bindery_domain::key::TypeRef;
use bindery_domain::ports::introspection::{ConstructorView, Introspector};
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;
use tracing::debug;

/// Constructor selection with a per-type cache.
pub struct ConstructorResolver {
    introspector: Arc<dyn Introspector>,
    cache: DashMap<TypeId, Option<ConstructorView>>,
}

impl ConstructorResolver {
    /// Resolver backed by the given introspection facade
    pub fn new(introspector: Arc<dyn Introspector>) -> Self {
        Self {
            introspector,
            cache: DashMap::new(),
        }
    }

    /// The backing introspection facade
    pub fn introspector(&self) -> &Arc<dyn Introspector> {
        &self.introspector
    }

    /// Find the optimal constructor for a type.
    ///
    /// When a type-aware binding exists for the type, `bound_target` is
    /// that binding's concrete type: constructors are resolved against
    /// it instead of the (possibly abstract) requested type. An
    /// abstract type without a concrete binding yields `Ok(None)`: it
    /// cannot be constructed directly, which is not an error at
    /// selection time.
    ///
    /// # Errors
    ///
    /// [`Error::MissingInjectConstructor`] when the target type is
    /// concrete but declares no injectable constructor.
    pub fn find_constructor(
        &self,
        ty: &TypeRef,
        bound_target: Option<&TypeRef>,
    ) -> Result<Option<ConstructorView>> {
        let target = bound_target.unwrap_or(ty);
        if let Some(cached) = self.cache.get(&target.id()) {
            return Ok(cached.clone());
        }

        let resolved = self.resolve_uncached(ty, target)?;
        // Insert-if-absent: a racing resolution computed the same value
        let entry = self.cache.entry(target.id()).or_insert(resolved);
        Ok(entry.clone())
    }

    fn resolve_uncached(&self, ty: &TypeRef, target: &TypeRef) -> Result<Option<ConstructorView>> {
        if self.introspector.is_abstract(target)? {
            debug!(ty = ty.name(), "abstract type without concrete binding has no constructor");
            return Ok(None);
        }

        let constructors = self.introspector.constructors_of(target)?;
        let candidates = injectable_constructors(&constructors);
        if candidates.is_empty() {
            return Err(Error::MissingInjectConstructor {
                type_name: target.name().to_string(),
            });
        }

        let optimal = optimal_constructor(candidates);
        debug!(
            ty = target.name(),
            parameters = optimal.parameter_count(),
            "selected optimal constructor"
        );
        Ok(Some(optimal.clone()))
    }
}

/// Constructors eligible per the injection-points policy: those with an
/// injection marker; else the sole declared constructor; else the
/// no-arg constructor as fallback.
fn injectable_constructors(constructors: &[ConstructorView]) -> Vec<&ConstructorView> {
    let marked: Vec<&ConstructorView> = constructors
        .iter()
        .filter(|c| c.is_inject_marked())
        .collect();
    if !marked.is_empty() {
        return marked;
    }
    if constructors.len() == 1 {
        return constructors.iter().collect();
    }
    constructors
        .iter()
        .filter(|c| c.parameter_count() == 0)
        .collect()
}

/// Greatest parameter count wins; ties go to the first constructor in
/// declaration order. The comparison is strictly-greater, so the result
/// is deterministic and independent of any comparator stability.
fn optimal_constructor<'a>(candidates: Vec<&'a ConstructorView>) -> &'a ConstructorView {
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.parameter_count() > best.parameter_count() {
            best = candidate;
        }
    }
    best
}
