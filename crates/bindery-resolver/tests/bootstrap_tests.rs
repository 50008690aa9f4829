//! End-to-end tests for the graph initializer
//!
//! One pass from declaration sources to a wired registry: managed
//! components and binding methods resolved together, singleton
//! memoization, priority-based decoration with self-delegation, cycle
//! policy, and the validation report for unprovided dependencies.

use bindery_domain::declaration::{
    BindsMethodRegistration, ComponentRegistration, DeclarationSource,
};
use bindery_domain::error::Error;
use bindery_domain::key::{ComponentKey, TypeRef};
use bindery_domain::ports::introspection::{
    FieldView, ManualIntrospector, ParameterView, TypeMetadata,
};
use bindery_resolver::bootstrap::DependencyGraphInitializer;
use std::sync::Arc;

struct Repository;

struct OrderService {
    repository: Arc<Repository>,
}

struct SessionStore;
struct UserService;

struct Greeting(String);

struct MetricsHub;
struct ReportService;

fn introspector() -> Arc<ManualIntrospector> {
    Arc::new(ManualIntrospector::new())
}

#[test]
fn test_managed_chain_shares_the_memoized_singleton() {
    let introspector = introspector();
    introspector.register(
        TypeMetadata::of::<Repository>().constructor(vec![], Arc::new(|_| Ok(Arc::new(Repository)))),
    );
    introspector.register(TypeMetadata::of::<OrderService>().constructor(
        vec![ParameterView::of(TypeRef::of::<Repository>())],
        Arc::new(|arguments| {
            let repository = arguments[0]
                .clone()
                .downcast::<Repository>()
                .map_err(|_| Error::resolution("expected a repository"))?;
            Ok(Arc::new(OrderService { repository }))
        }),
    ));

    let initializer = DependencyGraphInitializer::standard(introspector);
    let sources = vec![
        DeclarationSource::from(ComponentRegistration::of::<Repository>().singleton()),
        DeclarationSource::from(ComponentRegistration::of::<OrderService>()),
    ];
    let (registry, report) = initializer.initialize(&sources).expect("pass should wire");
    assert!(report.is_complete());

    let first = registry
        .get_instance::<OrderService>(&ComponentKey::of::<OrderService>())
        .expect("service should resolve");
    let second = registry
        .get_instance::<OrderService>(&ComponentKey::of::<OrderService>())
        .expect("service should resolve again");

    // Prototype service, singleton repository.
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.repository, &second.repository));

    let repository = registry
        .get_instance::<Repository>(&ComponentKey::of::<Repository>())
        .expect("repository should resolve");
    assert!(Arc::ptr_eq(&repository, &first.repository));
}

#[test]
fn test_binding_method_decorates_through_self_delegation() {
    // Priority 0 produces the base greeting; priority 2 wraps its own
    // return type by delegating to the next provider below it.
    let initializer = DependencyGraphInitializer::standard(introspector());
    let sources = vec![
        DeclarationSource::from(BindsMethodRegistration::new(
            TypeRef::of::<Greeting>(),
            Arc::new(|_| Ok(Arc::new(Greeting("hello".to_string())))),
        )
        .priority(0)),
        DeclarationSource::from(
            BindsMethodRegistration::new(
                TypeRef::of::<Greeting>(),
                Arc::new(|arguments| {
                    let inner = arguments[0]
                        .clone()
                        .downcast::<Greeting>()
                        .map_err(|_| Error::resolution("expected the base greeting"))?;
                    Ok(Arc::new(Greeting(format!("{}!", inner.0))))
                }),
            )
            .priority(2)
            .parameter(ParameterView::of(TypeRef::of::<Greeting>())),
        ),
    ];

    let (registry, report) = initializer.initialize(&sources).expect("pass should wire");
    assert!(report.is_complete());

    let greeting = registry
        .get_instance::<Greeting>(&ComponentKey::of::<Greeting>())
        .expect("decorated greeting should resolve");
    assert_eq!(greeting.0, "hello!");
}

#[test]
fn test_binding_method_consumes_a_managed_component() {
    let introspector = introspector();
    introspector.register(
        TypeMetadata::of::<Repository>().constructor(vec![], Arc::new(|_| Ok(Arc::new(Repository)))),
    );

    let initializer = DependencyGraphInitializer::standard(introspector);
    let sources = vec![
        DeclarationSource::from(ComponentRegistration::of::<Repository>().singleton()),
        DeclarationSource::from(
            BindsMethodRegistration::new(
                TypeRef::of::<Greeting>(),
                Arc::new(|arguments| {
                    arguments[0]
                        .clone()
                        .downcast::<Repository>()
                        .map_err(|_| Error::resolution("expected a repository"))?;
                    Ok(Arc::new(Greeting("from repository".to_string())))
                }),
            )
            .parameter(ParameterView::of(TypeRef::of::<Repository>())),
        ),
    ];

    let (registry, report) = initializer.initialize(&sources).expect("pass should wire");
    assert!(report.is_complete());

    let greeting = registry
        .get_instance::<Greeting>(&ComponentKey::of::<Greeting>())
        .expect("binding method should resolve its parameter");
    assert_eq!(greeting.0, "from repository");
}

#[test]
fn test_singleton_cycle_bootstraps_when_one_side_is_delayed() {
    // SessionStore needs UserService only after construction (a field),
    // UserService needs SessionStore to construct. The graph cycle is
    // tolerated for singletons and provision succeeds.
    let introspector = introspector();
    introspector.register(
        TypeMetadata::of::<SessionStore>()
            .constructor(vec![], Arc::new(|_| Ok(Arc::new(SessionStore))))
            .field(FieldView::of(TypeRef::of::<UserService>())),
    );
    introspector.register(TypeMetadata::of::<UserService>().constructor(
        vec![ParameterView::of(TypeRef::of::<SessionStore>())],
        Arc::new(|arguments| {
            arguments[0]
                .clone()
                .downcast::<SessionStore>()
                .map_err(|_| Error::resolution("expected a session store"))?;
            Ok(Arc::new(UserService))
        }),
    ));

    let initializer = DependencyGraphInitializer::standard(introspector);
    let sources = vec![
        DeclarationSource::from(ComponentRegistration::of::<SessionStore>().singleton()),
        DeclarationSource::from(ComponentRegistration::of::<UserService>().singleton()),
    ];

    let (registry, report) = initializer.initialize(&sources).expect("pass should wire");
    assert!(report.is_complete());
    registry
        .get(&ComponentKey::of::<UserService>())
        .expect("singleton cycle should provision through the delayed edge");
}

#[test]
fn test_prototype_cycle_aborts_the_pass() {
    let introspector = introspector();
    introspector.register(TypeMetadata::of::<SessionStore>().constructor(
        vec![ParameterView::of(TypeRef::of::<UserService>())],
        Arc::new(|_| Ok(Arc::new(SessionStore))),
    ));
    introspector.register(TypeMetadata::of::<UserService>().constructor(
        vec![ParameterView::of(TypeRef::of::<SessionStore>())],
        Arc::new(|_| Ok(Arc::new(UserService))),
    ));

    let initializer = DependencyGraphInitializer::standard(introspector);
    let sources = vec![
        DeclarationSource::from(ComponentRegistration::of::<SessionStore>()),
        DeclarationSource::from(ComponentRegistration::of::<UserService>()),
    ];

    match initializer.initialize(&sources) {
        Err(Error::CyclicDependency { path }) => {
            assert_eq!(path.len(), 2);
            assert!(path.type_names().contains(&"SessionStore"));
            assert!(path.type_names().contains(&"UserService"));
        }
        Ok(_) => panic!("a prototype cycle must abort the pass"),
        Err(other) => panic!("expected a cyclic dependency error, got {other}"),
    }
}

#[test]
fn test_unprovided_dependency_lands_in_the_report() {
    let introspector = introspector();
    introspector.register(TypeMetadata::of::<ReportService>().constructor(
        vec![ParameterView::of(TypeRef::of::<MetricsHub>())],
        Arc::new(|_| Ok(Arc::new(ReportService))),
    ));

    let initializer = DependencyGraphInitializer::standard(introspector);
    let sources = vec![DeclarationSource::from(
        ComponentRegistration::of::<ReportService>(),
    )];

    let (registry, report) = initializer.initialize(&sources).expect("pass should wire");

    assert_eq!(report.missing, vec!["MetricsHub".to_string()]);
    // The report is advisory; requesting the component still fails.
    assert!(registry.get(&ComponentKey::of::<ReportService>()).is_err());
}

#[test]
fn test_empty_sources_produce_an_empty_registry() {
    let initializer = DependencyGraphInitializer::standard(introspector());

    let (registry, report) = initializer.initialize(&[]).expect("empty pass should wire");

    assert!(registry.is_empty());
    assert!(report.is_complete());
}
