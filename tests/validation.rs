use ferrous_inject::{
    ActiveProfiles, ComponentCollection, ComponentDef, Inject, Resolver, ValidationError,
};
use std::sync::Arc;

trait Store: Send + Sync {}
struct Disk;
impl Store for Disk {}
struct Memory;
impl Store for Memory {}
struct Service;

fn collection(active: &str) -> ComponentCollection {
    let mut components = ComponentCollection::new();
    components.with_active_profiles(ActiveProfiles::parse(active));
    components
}

#[test]
fn test_valid_graph() {
    let mut components = collection("");
    components
        .register(
            ComponentDef::function(|_| Ok(Disk))
                .named("disk")
                .provides::<dyn Store, _>(|s| s as Arc<dyn Store>),
        )
        .unwrap()
        .register(
            ComponentDef::function(|_| Ok(Service))
                .named("service")
                .arg::<dyn Store>("store"),
        )
        .unwrap();
    let container = components.build();

    let result = container.validate();
    assert!(result.is_valid(), "{:?}", result.errors);
    assert_eq!(result.checked, 2);
    assert!(container.created().is_empty());
}

#[test]
fn test_missing_dependency_reported() {
    let mut components = collection("");
    components
        .register(
            ComponentDef::function(|_| Ok(Service))
                .named("service")
                .arg::<dyn Store>("store"),
        )
        .unwrap();

    let result = components.build().validate();
    match result.errors.as_slice() {
        [ValidationError::MissingDependency {
            component,
            parameter,
            request,
        }] => {
            assert!(component.starts_with("service"));
            assert_eq!(parameter, "store");
            assert!(request.contains("Store"));
            assert!(request.contains("'store'"));
        }
        other => panic!("unexpected errors {:?}", other),
    }
}

fn two_stores(service: ComponentDef<Service>) -> ComponentCollection {
    let mut components = collection("");
    components
        .register(
            ComponentDef::function(|_| Ok(Disk))
                .named("disk")
                .provides::<dyn Store, _>(|s| s as Arc<dyn Store>),
        )
        .unwrap()
        .register(
            ComponentDef::function(|_| Ok(Memory))
                .named("memory")
                .provides::<dyn Store, _>(|s| s as Arc<dyn Store>),
        )
        .unwrap()
        .register(service)
        .unwrap();
    components
}

#[test]
fn test_unmatched_parameter_name_reported_missing() {
    let components = two_stores(
        ComponentDef::function(|_| Ok(Service))
            .named("service")
            .arg::<dyn Store>("store"),
    );

    let result = components.build().validate();
    match result.errors.as_slice() {
        [ValidationError::MissingDependency {
            component,
            parameter,
            request,
        }] => {
            assert!(component.starts_with("service"));
            assert_eq!(parameter, "store");
            assert!(request.contains("Store"));
            assert!(request.contains("'store'"));
        }
        other => panic!("unexpected errors {:?}", other),
    }
}

#[test]
fn test_ambiguous_dependency_reported() {
    let components = two_stores(
        ComponentDef::function(|_| Ok(Service))
            .named("service")
            .arg::<dyn Store>("store")
            .inject("store", Inject::of::<dyn Store>()),
    );

    let result = components.build().validate();
    assert_eq!(result.errors.len(), 1);
    match &result.errors[0] {
        ValidationError::AmbiguousDependency { candidates, .. } => {
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("unexpected error {}", other),
    }
}

#[test]
fn test_overrides_are_honored() {
    let mut components = collection("");
    components
        .register(
            ComponentDef::function(|_| Ok(Disk))
                .named("disk")
                .provides::<dyn Store, _>(|s| s as Arc<dyn Store>),
        )
        .unwrap()
        .register(
            ComponentDef::function(|_| Ok(Memory))
                .named("memory")
                .provides::<dyn Store, _>(|s| s as Arc<dyn Store>),
        )
        .unwrap()
        .register(
            ComponentDef::function(|_| Ok(Service))
                .named("service")
                .arg::<dyn Store>("store")
                .inject("store", Inject::name("memory")),
        )
        .unwrap();

    assert!(components.build().validate().is_valid());
}

#[test]
fn test_ineligible_components_are_skipped() {
    let mut components = collection("dev");
    components
        .register(
            ComponentDef::function(|_| Ok(Service))
                .named("service")
                .profiles(["prod"])
                .arg_untyped("missing"),
        )
        .unwrap();

    let result = components.build().validate();
    assert!(result.is_valid());
    assert_eq!(result.checked, 0);
}

#[test]
fn test_dependency_on_ineligible_component_is_missing() {
    let mut components = collection("dev");
    components
        .register(
            ComponentDef::function(|_| Ok(Disk))
                .named("disk")
                .profiles(["prod"]),
        )
        .unwrap()
        .register(ComponentDef::function(|_| Ok(Service)).named("service").arg_untyped("disk"))
        .unwrap();
    let container = components.build();

    let result = container.validate();
    assert!(matches!(
        result.errors.as_slice(),
        [ValidationError::MissingDependency { .. }]
    ));
    assert!(result.errors[0].to_string().contains("argument 'disk'"));
    assert!(container.get::<Service>().is_err());
}
