//! Unit tests for declaration-to-context resolvers
//!
//! Managed components derive immediate dependencies from constructor
//! parameters and delayed dependencies from fields; binding methods
//! derive their key from name and return type; the composite unions
//! child outputs with set semantics over `(key, priority)`.

mod common;

use bindery_domain::declaration::{
    BindsMethodRegistration, ComponentRegistration, DeclarationSource,
};
use bindery_domain::dependency::{DependencyMap, DependencyResolutionType};
use bindery_domain::error::Error;
use bindery_domain::key::{ComponentKey, TypeRef};
use bindery_domain::lifecycle::LifecycleType;
use bindery_domain::ports::introspection::{
    ConstructorFactory, FieldView, ManualIntrospector, ParameterView, TypeMetadata,
};
use bindery_resolver::constructor::ConstructorResolver;
use bindery_resolver::resolver::{
    BindsMethodResolver, CompositeDependencyResolver, DependencyResolver,
    ManagedComponentResolver,
};
use common::StubContext;
use std::sync::Arc;

struct OrderService;
struct Repository;
struct EventBus;
struct RequestContext;
struct Mailer;

fn noop_factory() -> ConstructorFactory {
    Arc::new(|_| Ok(Arc::new(())))
}

fn managed_resolver(metadata: TypeMetadata) -> ManagedComponentResolver {
    let introspector = Arc::new(ManualIntrospector::new());
    introspector.register(metadata);
    ManagedComponentResolver::new(Arc::new(ConstructorResolver::new(introspector)))
}

#[test]
fn test_constructor_parameters_become_immediate_dependencies() {
    let resolver = managed_resolver(
        TypeMetadata::of::<OrderService>().constructor(
            vec![
                ParameterView::of(TypeRef::of::<Repository>()),
                ParameterView::of(TypeRef::of::<EventBus>()).named("orders"),
            ],
            noop_factory(),
        ),
    );
    let sources = vec![DeclarationSource::from(
        ComponentRegistration::of::<OrderService>().priority(2),
    )];

    let contexts = resolver.resolve(&sources).expect("resolution should succeed");
    assert_eq!(contexts.len(), 1);
    let context = &contexts[0];

    assert_eq!(context.key(), &ComponentKey::of::<OrderService>());
    assert_eq!(context.priority(), 2);
    let expected_bus = ComponentKey::builder(TypeRef::of::<EventBus>())
        .name("orders")
        .build()
        .expect("key should build");
    assert_eq!(
        context.dependencies().immediate_keys(),
        &[ComponentKey::of::<Repository>(), expected_bus]
    );
    assert!(context.dependencies().delayed_keys().is_empty());
}

#[test]
fn test_handled_parameters_never_become_edges() {
    let resolver = managed_resolver(
        TypeMetadata::of::<OrderService>().constructor(
            vec![
                ParameterView::of(TypeRef::of::<RequestContext>()).handled(),
                ParameterView::of(TypeRef::of::<Repository>()),
            ],
            noop_factory(),
        ),
    );
    let sources = vec![DeclarationSource::from(
        ComponentRegistration::of::<OrderService>(),
    )];

    let contexts = resolver.resolve(&sources).expect("resolution should succeed");

    assert_eq!(
        contexts[0].dependencies().immediate_keys(),
        &[ComponentKey::of::<Repository>()]
    );
}

#[test]
fn test_fields_become_delayed_dependencies() {
    let resolver = managed_resolver(
        TypeMetadata::of::<OrderService>()
            .constructor(vec![], noop_factory())
            .field(FieldView::of(TypeRef::of::<Mailer>())),
    );
    let sources = vec![DeclarationSource::from(
        ComponentRegistration::of::<OrderService>(),
    )];

    let contexts = resolver.resolve(&sources).expect("resolution should succeed");

    assert!(contexts[0].dependencies().immediate_keys().is_empty());
    assert_eq!(
        contexts[0].dependencies().delayed_keys(),
        &[ComponentKey::of::<Mailer>()]
    );
    assert_eq!(
        contexts[0]
            .dependencies()
            .resolution_of(&ComponentKey::of::<Mailer>()),
        Some(DependencyResolutionType::Delayed)
    );
}

#[test]
fn test_unregistered_component_type_fails_resolution() {
    let resolver = ManagedComponentResolver::new(Arc::new(ConstructorResolver::new(Arc::new(
        ManualIntrospector::new(),
    ))));
    let sources = vec![DeclarationSource::from(
        ComponentRegistration::of::<OrderService>(),
    )];

    let result = resolver.resolve(&sources);

    assert!(matches!(result, Err(Error::MissingTypeMetadata { .. })));
}

#[test]
fn test_binds_method_key_derives_from_name_and_return_type() {
    let resolver = BindsMethodResolver::new();
    let sources = vec![DeclarationSource::from(
        BindsMethodRegistration::new(TypeRef::of::<Mailer>(), noop_factory())
            .named("smtp")
            .priority(1)
            .parameter(ParameterView::of(TypeRef::of::<Repository>())),
    )];

    let contexts = resolver.resolve(&sources).expect("resolution should succeed");
    assert_eq!(contexts.len(), 1);
    let context = &contexts[0];

    let expected = ComponentKey::builder(TypeRef::of::<Mailer>())
        .name("smtp")
        .build()
        .expect("key should build");
    assert_eq!(context.key(), &expected);
    assert_eq!(context.priority(), 1);
    assert_eq!(
        context.dependencies().immediate_keys(),
        &[ComponentKey::of::<Repository>()]
    );
}

#[test]
fn test_self_type_parameter_creates_no_edge() {
    // A binding method wrapping its own return type delegates downward
    // in the hierarchy instead of depending on itself.
    let resolver = BindsMethodResolver::new();
    let sources = vec![DeclarationSource::from(
        BindsMethodRegistration::new(TypeRef::of::<Mailer>(), noop_factory())
            .priority(2)
            .parameter(ParameterView::of(TypeRef::of::<Mailer>())),
    )];

    let contexts = resolver.resolve(&sources).expect("resolution should succeed");

    assert!(contexts[0].dependencies().is_empty());
}

#[test]
fn test_each_resolver_ignores_the_other_declaration_kind() {
    let sources = vec![
        DeclarationSource::from(
            BindsMethodRegistration::new(TypeRef::of::<Mailer>(), noop_factory()),
        ),
    ];
    let managed =
        managed_resolver(TypeMetadata::of::<OrderService>().constructor(vec![], noop_factory()));

    let contexts = managed.resolve(&sources).expect("resolution should succeed");

    assert!(contexts.is_empty());
}

#[test]
fn test_composite_unions_with_set_semantics() {
    struct FixedResolver {
        lifecycle: LifecycleType,
        priority: i32,
    }

    impl DependencyResolver for FixedResolver {
        fn resolve(
            &self,
            _sources: &[DeclarationSource],
        ) -> bindery_domain::error::Result<
            Vec<Arc<dyn bindery_domain::dependency::DependencyContext>>,
        > {
            Ok(vec![
                StubContext::new(ComponentKey::of::<Repository>(), self.lifecycle)
                    .with_priority(self.priority)
                    .with_dependencies(DependencyMap::new())
                    .into_arc(),
            ])
        }
    }

    // Same (key, priority) twice collapses to one context; a different
    // priority is a distinct binding.
    let composite = CompositeDependencyResolver::default()
        .with(Arc::new(FixedResolver {
            lifecycle: LifecycleType::Prototype,
            priority: 0,
        }))
        .with(Arc::new(FixedResolver {
            lifecycle: LifecycleType::Singleton,
            priority: 0,
        }))
        .with(Arc::new(FixedResolver {
            lifecycle: LifecycleType::Prototype,
            priority: 1,
        }));

    let contexts = composite.resolve(&[]).expect("resolution should succeed");

    assert_eq!(contexts.len(), 2);
    assert_eq!(contexts[0].priority(), 0);
    assert_eq!(contexts[1].priority(), 1);
}

#[test]
fn test_composite_propagates_child_failures() {
    let composite = CompositeDependencyResolver::new(vec![Arc::new(
        ManagedComponentResolver::new(Arc::new(ConstructorResolver::new(Arc::new(
            ManualIntrospector::new(),
        )))),
    )]);
    let sources = vec![DeclarationSource::from(
        ComponentRegistration::of::<OrderService>(),
    )];

    assert!(composite.resolve(&sources).is_err());
}
