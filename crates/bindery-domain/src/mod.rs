//! # Bindery Domain Layer
//!
//! Core vocabulary of the binding engine: typed component identities,
//! discovered dependency metadata, provider variants, object containers,
//! and the ports that connect the engine to its collaborators.
//!
//! ## Module Categories
//!
//! ### Identity & Metadata
//! | Module | Description |
//! |--------|-------------|
//! | [`key`] | Typed, qualifier-aware component identity |
//! | [`lifecycle`] | Singleton/prototype lifecycle policies |
//! | [`dependency`] | Dependency partitions and discovered contexts |
//! | [`declaration`] | Declaration sources consumed by resolvers |
//!
//! ### Provision
//! | Module | Description |
//! |--------|-------------|
//! | [`provider`] | Closed provider variant set (type-aware, supplier, composed) |
//! | [`container`] | Object containers tracking post-processing state |
//!
//! ### Ports & Diagnostics
//! | Module | Description |
//! |--------|-------------|
//! | [`ports`] | Introspection facade and binder seams |
//! | [`diagnostics`] | Cycle paths and validation reports |
//! | [`error`] | Error taxonomy for the whole engine |

pub mod constants;
pub mod container;
pub mod declaration;
pub mod dependency;
pub mod diagnostics;
pub mod error;
pub mod key;
pub mod lifecycle;
pub mod ports;
pub mod provider;

// Re-export commonly used types at the crate root
pub use container::{Instance, ObjectContainer};
pub use declaration::{BindsMethodRegistration, ComponentRegistration, DeclarationSource};
pub use dependency::{DependencyContext, DependencyMap, DependencyResolutionType};
pub use diagnostics::{CyclePath, DiscoveryEntry, ValidationReport};
pub use error::{Error, ProviderKind, Result};
pub use key::{ComponentKey, ComponentKeyBuilder, ScopeRef, SelectionStrategy, TypeRef};
pub use lifecycle::LifecycleType;
pub use ports::binder::{Binder, BindingFunction, ProviderSink};
pub use ports::introspection::{
    ConstructorFactory, ConstructorView, FieldView, Introspector, ManualIntrospector,
    ParameterView, TypeMetadata,
};
pub use provider::{Provider, ProvisionContext};
