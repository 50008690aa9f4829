//! Ports connecting the engine to its collaborators
//!
//! The engine never inspects source-language metadata directly and
//! never talks to a concrete container type: all type queries go
//! through the [`introspection`] facade and all provider registration
//! goes through the [`binder`] seam.

pub mod binder;
pub mod introspection;

pub use binder::{Binder, BindingFunction, ProviderSink};
pub use introspection::{
    ConstructorFactory, ConstructorView, FieldView, Introspector, ManualIntrospector,
    ParameterView, TypeMetadata,
};
