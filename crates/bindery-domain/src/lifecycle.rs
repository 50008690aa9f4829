//! Component lifecycle policies

use serde::{Deserialize, Serialize};

/// Controls whether a produced instance is memoized.
///
/// Singletons are constructed once and shared; prototypes are fresh on
/// every request. The distinction also drives cycle tolerance during
/// graph traversal: singleton cycles resolve at runtime because the
/// first constructed instance breaks the loop, prototype cycles never
/// terminate and are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleType {
    /// Construct once, memoize, share
    Singleton,
    /// Construct fresh on every request
    Prototype,
}

impl LifecycleType {
    /// Whether instances with this lifecycle are memoized
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl Default for LifecycleType {
    fn default() -> Self {
        Self::Prototype
    }
}
