use ferrous_inject::{
    ActiveProfiles, ComponentCollection, ComponentDef, Container, DiError, Resolver,
};
use serial_test::serial;

struct Mailer(&'static str);
struct Audit;

fn container(active: &str) -> Container {
    let mut components = ComponentCollection::new();
    components
        .with_active_profiles(ActiveProfiles::parse(active))
        .register(ComponentDef::function(|_| Ok(Audit)).named("audit"))
        .unwrap()
        .register(
            ComponentDef::function(|_| Ok(Mailer("smtp")))
                .named("smtp")
                .profiles(["prod"]),
        )
        .unwrap();
    components.build()
}

#[test]
fn test_unprofiled_component_always_eligible() {
    for active in ["", "dev", "prod", "prod,dev"] {
        assert!(container(active).get::<Audit>().is_ok(), "active = {:?}", active);
    }
}

#[test]
fn test_profiled_component_gated_by_active_set() {
    assert!(matches!(
        container("").get::<Mailer>(),
        Err(DiError::NotFound { .. })
    ));
    assert!(matches!(
        container("dev").get::<Mailer>(),
        Err(DiError::NotFound { .. })
    ));
    assert_eq!(container("prod").get::<Mailer>().unwrap().0, "smtp");
    assert_eq!(container("prod,dev").get::<Mailer>().unwrap().0, "smtp");
}

#[test]
fn test_ineligible_component_invisible_by_name() {
    assert!(matches!(
        container("dev").get_by_name::<Mailer>("smtp"),
        Err(DiError::NotFound { .. })
    ));
}

#[test]
fn test_profiles_select_between_alternatives() {
    fn build(active: &str) -> Container {
        let mut components = ComponentCollection::new();
        components
            .with_active_profiles(ActiveProfiles::parse(active))
            .register(
                ComponentDef::function(|_| Ok(Mailer("smtp")))
                    .named("smtp")
                    .profiles(["prod"]),
            )
            .unwrap()
            .register(
                ComponentDef::function(|_| Ok(Mailer("stdout")))
                    .named("stdout")
                    .profiles(["dev", "test"]),
            )
            .unwrap();
        components.build()
    }

    assert_eq!(build("prod").get::<Mailer>().unwrap().0, "smtp");
    assert_eq!(build("test").get::<Mailer>().unwrap().0, "stdout");
    assert!(matches!(
        build("prod,dev").get::<Mailer>(),
        Err(DiError::Ambiguous { .. })
    ));
    assert_eq!(build("prod,dev").get_named::<Mailer>("stdout").unwrap().0, "stdout");
}

#[test]
fn test_profile_matching_is_case_insensitive() {
    let mut components = ComponentCollection::new();
    components
        .with_active_profiles(ActiveProfiles::parse(" PROD "))
        .register(
            ComponentDef::function(|_| Ok(Mailer("smtp")))
                .named("smtp")
                .profiles(["Prod"]),
        )
        .unwrap();
    assert!(components.build().get::<Mailer>().is_ok());
}

#[test]
#[serial]
fn test_profiles_read_from_environment() {
    const VAR: &str = "FERROUS_INJECT_TEST_PROFILES";

    std::env::set_var(VAR, "Staging, eu");
    let active = ActiveProfiles::from_env_var(VAR);
    assert!(active.contains("staging"));
    assert!(active.contains("eu"));
    assert_eq!(active.len(), 2);

    std::env::remove_var(VAR);
    assert!(ActiveProfiles::from_env_var(VAR).is_empty());
}

#[test]
#[serial]
fn test_empty_environment_value_activates_nothing() {
    const VAR: &str = "FERROUS_INJECT_TEST_PROFILES";

    std::env::set_var(VAR, " , ,");
    assert!(ActiveProfiles::from_env_var(VAR).is_empty());
    std::env::remove_var(VAR);
}

#[test]
fn test_container_reports_active_profiles() {
    let container = container("prod,eu");
    assert_eq!(container.active_profiles().to_string(), "{eu,prod}");
}
