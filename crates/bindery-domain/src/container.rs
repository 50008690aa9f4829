//! Object containers tracking post-processing state

use crate::lifecycle::LifecycleType;
use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Erased, shared instance produced by a provider
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wrapper around a plain produced instance.
///
/// The `processed` flag records whether post-construction processing
/// (field population, lifecycle callbacks) has run; it is shared across
/// clones so memoized singletons observe a single processing state.
#[derive(Clone)]
pub struct InstanceContainer {
    instance: Instance,
    processed: Arc<AtomicBool>,
}

impl InstanceContainer {
    /// Wrap an already-erased instance
    pub fn new(instance: Instance) -> Self {
        Self {
            instance,
            processed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Wrap a concrete value
    pub fn of<T: Send + Sync + 'static>(value: T) -> Self {
        Self::new(Arc::new(value))
    }

    /// The wrapped instance
    pub fn instance(&self) -> Instance {
        Arc::clone(&self.instance)
    }
}

/// Wrapper around a collection of member containers.
///
/// Processing state delegates to the members: the collection counts as
/// processed once every member is, and marking it processed fans out.
/// Lifecycle is always [`LifecycleType::Prototype`] because member
/// composition may change between requests.
#[derive(Clone, Default)]
pub struct CollectionContainer {
    members: Vec<ObjectContainer>,
}

impl CollectionContainer {
    /// Collection over the given member containers
    pub fn new(members: Vec<ObjectContainer>) -> Self {
        Self { members }
    }

    /// Member containers
    pub fn members(&self) -> &[ObjectContainer] {
        &self.members
    }

    /// Member instances in registration order
    pub fn instances(&self) -> Vec<Instance> {
        self.members.iter().map(ObjectContainer::instance).collect()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the collection has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Mutable wrapper around a produced instance plus its post-processing
/// state.
///
/// The variant set is closed:
/// - [`ObjectContainer::Instance`]: a plain instance; the only
///   globally cacheable variant
/// - [`ObjectContainer::Collection`]: a component collection; always
///   prototype-scoped
/// - [`ObjectContainer::CollectionEntry`]: one element resolved for a
///   collection; never cached on its own, caching happens at the
///   collection provider level
#[derive(Clone)]
pub enum ObjectContainer {
    /// Plain instance container
    Instance(InstanceContainer),
    /// Collection-of-components container
    Collection(CollectionContainer),
    /// Single element produced for a collection
    CollectionEntry(Box<ObjectContainer>),
}

impl ObjectContainer {
    /// Container over a concrete value
    pub fn of<T: Send + Sync + 'static>(value: T) -> Self {
        Self::Instance(InstanceContainer::of(value))
    }

    /// Container over an already-erased instance
    pub fn from_instance(instance: Instance) -> Self {
        Self::Instance(InstanceContainer::new(instance))
    }

    /// Wrap a container as a collection element
    pub fn into_entry(self) -> Self {
        Self::CollectionEntry(Box::new(self))
    }

    /// The wrapped instance. Collections erase to a `Vec<Instance>` of
    /// their member instances.
    pub fn instance(&self) -> Instance {
        match self {
            Self::Instance(inner) => inner.instance(),
            Self::Collection(inner) => Arc::new(inner.instances()),
            Self::CollectionEntry(inner) => inner.instance(),
        }
    }

    /// Typed view of the wrapped instance
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.instance().downcast::<T>().ok()
    }

    /// Whether post-construction processing has run
    pub fn is_processed(&self) -> bool {
        match self {
            Self::Instance(inner) => inner.processed.load(Ordering::Acquire),
            Self::Collection(inner) => {
                inner.members.iter().all(ObjectContainer::is_processed)
            }
            Self::CollectionEntry(inner) => inner.is_processed(),
        }
    }

    /// Record that post-construction processing has run
    pub fn mark_processed(&self) {
        match self {
            Self::Instance(inner) => inner.processed.store(true, Ordering::Release),
            Self::Collection(inner) => {
                for member in &inner.members {
                    member.mark_processed();
                }
            }
            Self::CollectionEntry(inner) => inner.mark_processed(),
        }
    }

    /// Lifecycle this container can be cached under. Collections are
    /// always prototype-scoped.
    pub fn lifecycle(&self) -> LifecycleType {
        match self {
            Self::Instance(_) | Self::CollectionEntry(_) => LifecycleType::Singleton,
            Self::Collection(_) => LifecycleType::Prototype,
        }
    }

    /// Whether this container may be memoized in a global singleton
    /// cache. Entries must be cached at the collection provider level,
    /// never individually.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::Instance(_))
    }
}

impl std::fmt::Debug for ObjectContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance(inner) => f
                .debug_struct("InstanceContainer")
                .field("processed", &inner.processed.load(Ordering::Acquire))
                .finish_non_exhaustive(),
            Self::Collection(inner) => f
                .debug_struct("CollectionContainer")
                .field("members", &inner.members.len())
                .finish(),
            Self::CollectionEntry(inner) => {
                f.debug_tuple("CollectionEntry").field(inner).finish()
            }
        }
    }
}
