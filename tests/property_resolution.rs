/// Property-based tests for registration and resolution
///
/// These tests use proptest to generate random inputs and verify invariants
/// that should hold for all valid registrations.
use ferrous_inject::{ActiveProfiles, ComponentCollection, ComponentDef, DiError, Resolver};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

fn profile_name() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,6}"
}

proptest! {
    #[test]
    fn parsed_profiles_are_normalized(tokens in prop::collection::vec("[ a-zA-Z]{0,8}", 0..8)) {
        let active = ActiveProfiles::parse(&tokens.join(","));

        let expected: BTreeSet<String> = tokens
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let actual: BTreeSet<String> = active.iter().map(str::to_owned).collect();
        prop_assert_eq!(actual, expected);

        // Rendering and parsing again is stable
        let rendered = active.iter().collect::<Vec<_>>().join(",");
        prop_assert_eq!(ActiveProfiles::parse(&rendered), active);
    }

    #[test]
    fn profiled_component_resolves_iff_profiles_intersect(
        required in prop::collection::btree_set(profile_name(), 0..4),
        active in prop::collection::btree_set(profile_name(), 0..4),
    ) {
        let mut components = ComponentCollection::new();
        components
            .with_active_profiles(ActiveProfiles::from_names(&active))
            .register(
                ComponentDef::function(|_| Ok(7u8))
                    .named("gated")
                    .profiles(&required),
            )
            .unwrap();
        let container = components.build();

        let required: BTreeSet<String> = required.iter().map(|p| p.to_lowercase()).collect();
        let active: BTreeSet<String> = active.iter().map(|p| p.to_lowercase()).collect();
        let eligible = required.is_empty() || !required.is_disjoint(&active);

        match container.get::<u8>() {
            Ok(value) => {
                prop_assert!(eligible);
                prop_assert_eq!(*value, 7);
            }
            Err(DiError::NotFound { .. }) => prop_assert!(!eligible),
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn distinct_names_resolve_to_their_own_instance(count in 1usize..24) {
        let mut components = ComponentCollection::new();
        components.with_active_profiles(ActiveProfiles::none());
        for i in 0..count {
            components
                .register(ComponentDef::function(move |_| Ok(i)).named(format!("c{}", i)))
                .unwrap();
        }
        let container = components.build();

        for i in 0..count {
            let first = container.get_by_name::<usize>(&format!("c{}", i)).unwrap();
            let second = container.get_by_name::<usize>(&format!("c{}", i)).unwrap();
            prop_assert_eq!(*first, i);
            prop_assert!(Arc::ptr_eq(&first, &second));
        }
        prop_assert_eq!(container.created().len(), count);

        if count > 1 {
            let is_ambiguous = matches!(container.get::<usize>(), Err(DiError::Ambiguous { .. }));
            prop_assert!(is_ambiguous);
        }
    }

    #[test]
    fn reused_name_is_always_rejected(names in prop::collection::vec("[a-z]{1,3}", 1..12)) {
        let mut components = ComponentCollection::new();
        let mut seen = BTreeSet::new();
        for (i, name) in names.iter().enumerate() {
            let result = components
                .register(ComponentDef::function(move |_| Ok(i)).named(name.clone()))
                .map(|_| ());
            if seen.insert(name.clone()) {
                prop_assert!(result.is_ok());
            } else {
                let is_duplicate = matches!(result, Err(DiError::DuplicateName(ref n)) if n == name);
                prop_assert!(is_duplicate);
            }
        }
        prop_assert_eq!(components.len(), seen.len());
    }
}
