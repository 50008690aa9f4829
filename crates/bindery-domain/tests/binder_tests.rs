//! Unit tests for the binding DSL and provider variants
//!
//! Each terminal of [`BindingFunction`] installs the matching provider
//! variant into the sink with the configured priority, lifecycle, and
//! laziness.

use bindery_domain::constants::DEFAULT_PRIORITY;
use bindery_domain::container::{Instance, ObjectContainer};
use bindery_domain::error::{Error, Result};
use bindery_domain::key::{ComponentKey, TypeRef};
use bindery_domain::lifecycle::LifecycleType;
use bindery_domain::ports::binder::{BindingFunction, ProviderSink};
use bindery_domain::provider::{Provider, ProvisionContext};
use std::sync::Arc;
use std::sync::Mutex;

struct Gateway;
struct StripeGateway {
    currency: &'static str,
}

/// Sink recording every installed binding.
#[derive(Default)]
struct RecordingSink {
    installed: Mutex<Vec<(ComponentKey, i32, Provider)>>,
}

impl RecordingSink {
    fn single(&self) -> (ComponentKey, i32, Provider) {
        let installed = self.installed.lock().expect("sink lock should not poison");
        assert_eq!(installed.len(), 1);
        installed[0].clone()
    }
}

impl ProviderSink for RecordingSink {
    fn install(&self, key: ComponentKey, priority: i32, provider: Provider) -> Result<()> {
        self.installed
            .lock()
            .expect("sink lock should not poison")
            .push((key, priority, provider));
        Ok(())
    }
}

/// Provision context that refuses everything; used where providers must
/// not reach back into the container.
struct InertContext;

impl ProvisionContext for InertContext {
    fn resolve(&self, key: &ComponentKey) -> Result<ObjectContainer> {
        Err(Error::resolution(format!("unexpected resolve of {key}")))
    }

    fn construct(&self, ty: &TypeRef) -> Result<Instance> {
        Err(Error::resolution(format!(
            "unexpected construct of {}",
            ty.simple_name()
        )))
    }

    fn contextual(&self, ty: &TypeRef) -> Result<Instance> {
        Err(Error::resolution(format!(
            "unexpected contextual supply of {}",
            ty.simple_name()
        )))
    }
}

#[test]
fn test_to_type_installs_a_type_aware_provider() {
    let sink = RecordingSink::default();

    BindingFunction::new(&sink, ComponentKey::of::<Gateway>())
        .priority(2)
        .lifecycle(LifecycleType::Singleton)
        .lazy(true)
        .to_type(TypeRef::of::<StripeGateway>())
        .expect("binding should install");

    let (key, priority, provider) = sink.single();
    assert_eq!(key, ComponentKey::of::<Gateway>());
    assert_eq!(priority, 2);
    assert_eq!(
        provider.concrete_type().map(TypeRef::simple_name),
        Some("StripeGateway")
    );
    assert_eq!(provider.default_lifecycle(), LifecycleType::Singleton);
    assert!(provider.default_laziness());
}

#[test]
fn test_defaults_are_prototype_eager_default_priority() {
    let sink = RecordingSink::default();

    BindingFunction::new(&sink, ComponentKey::of::<Gateway>())
        .to_type(TypeRef::of::<StripeGateway>())
        .expect("binding should install");

    let (_, priority, provider) = sink.single();
    assert_eq!(priority, DEFAULT_PRIORITY);
    assert_eq!(provider.default_lifecycle(), LifecycleType::Prototype);
    assert!(!provider.default_laziness());
}

#[test]
fn test_to_supplier_produces_through_the_closure() {
    let sink = RecordingSink::default();

    BindingFunction::new(&sink, ComponentKey::of::<Gateway>())
        .to_supplier(|_| Ok(Arc::new(StripeGateway { currency: "EUR" })))
        .expect("binding should install");

    let (_, _, provider) = sink.single();
    assert!(provider.concrete_type().is_none());
    let container = provider
        .provide(&InertContext)
        .expect("supplier should produce");
    let gateway = container
        .downcast::<StripeGateway>()
        .expect("produced instance should downcast");
    assert_eq!(gateway.currency, "EUR");
}

#[test]
fn test_to_instance_is_singleton_and_shares_the_value() {
    let sink = RecordingSink::default();

    BindingFunction::new(&sink, ComponentKey::of::<Gateway>())
        .to_instance(StripeGateway { currency: "USD" })
        .expect("binding should install");

    let (_, _, provider) = sink.single();
    assert_eq!(provider.default_lifecycle(), LifecycleType::Singleton);

    let first = provider
        .provide(&InertContext)
        .expect("instance provider should produce")
        .downcast::<StripeGateway>()
        .expect("produced instance should downcast");
    let second = provider
        .provide(&InertContext)
        .expect("instance provider should produce again")
        .downcast::<StripeGateway>()
        .expect("produced instance should downcast");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_composed_provider_applies_transforms_in_order() {
    let base = Provider::instance(StripeGateway { currency: "USD" });
    let composed = base.composed(vec![
        Arc::new(|_: &dyn ProvisionContext, container: ObjectContainer| {
            container.mark_processed();
            Ok(container)
        }),
    ]);

    let container = composed
        .provide(&InertContext)
        .expect("composed provider should produce");
    assert!(container.is_processed());
    assert!(composed.concrete_type().is_none());
}
