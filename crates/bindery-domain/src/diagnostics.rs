//! Cycle paths and validation reports
//!
//! Diagnostics are rendered for humans (the boxed cycle diagram) and
//! serialized for machines, so callers can surface either form.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::VecDeque;

/// One step of a dependency discovery path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryEntry {
    /// Simple name of the requested type
    pub type_name: String,
    /// Concrete type that satisfied the request via an explicit binding,
    /// when it differs from the requested type
    pub implemented_by: Option<String>,
}

impl DiscoveryEntry {
    /// Entry for a component satisfied by its own declared type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            implemented_by: None,
        }
    }

    /// Entry for a component satisfied via an explicit binding
    pub fn implemented_by(type_name: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            implemented_by: Some(actual.into()),
        }
    }

    fn render(&self) -> String {
        match &self.implemented_by {
            Some(actual) => format!("{} (implemented by {})", self.type_name, actual),
            None => self.type_name.clone(),
        }
    }
}

/// Ordered discovery path closing a dependency cycle.
///
/// Entries are stored most-recently-discovered first (head insertion);
/// [`CyclePath::entries`] restores discovery order, and rendering and
/// serialization always use discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CyclePath {
    // front = most recently discovered
    entries: VecDeque<DiscoveryEntry>,
}

impl CyclePath {
    /// Empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Path over entries already in discovery order
    pub fn from_entries(entries: impl IntoIterator<Item = DiscoveryEntry>) -> Self {
        let mut path = Self::new();
        for entry in entries {
            path.push_head(entry);
        }
        path
    }

    /// Insert the most recently discovered entry at the head
    pub fn push_head(&mut self, entry: DiscoveryEntry) {
        self.entries.push_front(entry);
    }

    /// Entries in discovery order (origin first)
    pub fn entries(&self) -> impl Iterator<Item = &DiscoveryEntry> {
        self.entries.iter().rev()
    }

    /// Number of entries in the path
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Simple type names along the path, in discovery order
    pub fn type_names(&self) -> Vec<&str> {
        self.entries().map(|e| e.type_name.as_str()).collect()
    }

    /// Name of the component the cycle was discovered from: the actual
    /// bound type when the origin is binding-satisfied, otherwise the
    /// requested type.
    pub fn origin(&self) -> Option<&str> {
        self.entries().next().map(|entry| {
            entry
                .implemented_by
                .as_deref()
                .unwrap_or(entry.type_name.as_str())
        })
    }

    /// Render the boxed diagram for the cycle.
    ///
    /// ```text
    /// Cyclic dependency detected for component 'OrderService'
    /// ┌──▶ OrderService
    /// │      ↓
    /// │    PaymentService (implemented by StripePayments)
    /// └──────┘
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!(
            "Cyclic dependency detected for component '{}'",
            self.origin().unwrap_or("<unknown>")
        );
        for (position, entry) in self.entries().enumerate() {
            if position == 0 {
                out.push_str(&format!("\n\u{250c}\u{2500}\u{2500}\u{25b6} {}", entry.render()));
            } else {
                out.push_str("\n\u{2502}      \u{2193}");
                out.push_str(&format!("\n\u{2502}    {}", entry.render()));
            }
        }
        out.push_str("\n\u{2514}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2518}");
        out
    }
}

impl std::fmt::Display for CyclePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl Serialize for CyclePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in self.entries() {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

/// Outcome of validating a dependency graph after traversal.
///
/// Missing dependencies are a soft condition: some are legitimately
/// satisfied by another mechanism, so absence is reported rather than
/// raised, and the caller decides whether it is fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Rendered keys of dependencies no node in the graph provides
    pub missing: Vec<String>,
}

impl ValidationReport {
    /// Whether every dependency was satisfied
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
