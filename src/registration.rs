//! Component descriptors and the registry indexing them.

use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::dependency::{Arguments, Dependency, Inject, Requirement};
use crate::error::{ComponentResult, DiError, DiResult};
use crate::key::TypeKey;
use crate::profile::ActiveProfiles;
use crate::traits::Lifecycle;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

pub(crate) type Ctor = Arc<dyn Fn(&Arguments) -> ComponentResult<AnyArc> + Send + Sync>;

/// Turns the cached instance into an `Arc<Arc<U>>` erased as `AnyArc`.
pub(crate) type ViewCast = Arc<dyn Fn(&AnyArc) -> Option<AnyArc> + Send + Sync>;

pub(crate) type LifecycleCast = Arc<dyn Fn(&AnyArc) -> Option<Arc<dyn Lifecycle>> + Send + Sync>;

/// How a descriptor was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ComponentSource {
    /// A self-registering [`Injectable`](crate::Injectable) type.
    Type,
    /// A standalone constructor function.
    Function,
}

/// A type the descriptor can be resolved under.
#[derive(Clone)]
pub(crate) struct View {
    pub(crate) key: TypeKey,
    pub(crate) cast: ViewCast,
}

/// Registered unit of construction.
///
/// Everything except `instance` is fixed at registration. `instance` is set at
/// most once, under `lock`, and never cleared.
pub(crate) struct Descriptor {
    pub(crate) id: usize,
    pub(crate) source: ComponentSource,
    pub(crate) produced: TypeKey,
    pub(crate) name: Option<String>,
    pub(crate) label: String,
    pub(crate) dependencies: Vec<Dependency>,
    pub(crate) overrides: HashMap<String, Inject>,
    pub(crate) profiles: BTreeSet<String>,
    /// Produced type first, then declared interfaces in declaration order.
    pub(crate) views: Vec<View>,
    pub(crate) lifecycle: Option<LifecycleCast>,
    pub(crate) ctor: Ctor,
    pub(crate) instance: OnceCell<AnyArc>,
    pub(crate) lock: Mutex<()>,
}

impl Descriptor {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        source: ComponentSource,
        produced: TypeKey,
        name: Option<String>,
        dependencies: Vec<Dependency>,
        overrides: HashMap<String, Inject>,
        profiles: BTreeSet<String>,
        views: Vec<View>,
        lifecycle: Option<LifecycleCast>,
        ctor: Ctor,
    ) -> Self {
        let label = match &name {
            Some(name) => format!("{} ({})", name, produced.type_name()),
            None => produced.type_name().to_string(),
        };
        Self {
            id: 0,
            source,
            produced,
            name,
            label,
            dependencies,
            overrides,
            profiles,
            views,
            lifecycle,
            ctor,
            instance: OnceCell::new(),
            lock: Mutex::new(()),
        }
    }

    /// The `(type?, name?)` request for one manifest entry.
    pub(crate) fn requirement<'a>(&'a self, dependency: &'a Dependency) -> Requirement<'a> {
        Requirement::route(dependency, self.overrides.get(dependency.parameter()))
    }

    pub(crate) fn is_eligible(&self, active: &ActiveProfiles) -> bool {
        active.admits(&self.profiles)
    }

    pub(crate) fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    pub(crate) fn provides(&self, key: &TypeKey) -> bool {
        self.views.iter().any(|v| v.key == *key)
    }

    /// Views `instance` as the type behind `key`; the result holds an `Arc<U>`.
    pub(crate) fn view(&self, key: &TypeKey, instance: &AnyArc) -> Option<AnyArc> {
        self.views
            .iter()
            .find(|v| v.key == *key)
            .and_then(|v| (v.cast)(instance))
    }

    #[inline(always)]
    pub(crate) fn cached(&self) -> Option<&AnyArc> {
        self.instance.get()
    }
}

/// Component registry holding all descriptors
///
/// Populated by a single owner during the registration phase and read-only
/// once the container is built.
#[derive(Default)]
pub(crate) struct Registry {
    by_type: HashMap<TypeKey, Vec<Arc<Descriptor>>>,
    by_name: HashMap<String, Arc<Descriptor>>,
    /// Registration order
    all: Vec<Arc<Descriptor>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Indexes a descriptor by name and under every type it provides.
    pub(crate) fn register(&mut self, mut descriptor: Descriptor) -> DiResult<Arc<Descriptor>> {
        if let Some(name) = &descriptor.name {
            if self.by_name.contains_key(name) {
                return Err(DiError::DuplicateName(name.clone()));
            }
        }

        descriptor.id = self.all.len();
        let descriptor = Arc::new(descriptor);

        if let Some(name) = &descriptor.name {
            self.by_name.insert(name.clone(), descriptor.clone());
        }
        for view in &descriptor.views {
            self.by_type
                .entry(view.key)
                .or_default()
                .push(descriptor.clone());
        }
        self.all.push(descriptor.clone());
        Ok(descriptor)
    }

    pub(crate) fn lookup_by_type(&self, key: &TypeKey) -> &[Arc<Descriptor>] {
        self.by_type.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn lookup_by_name(&self, name: &str) -> Option<&Arc<Descriptor>> {
        self.by_name.get(name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<Descriptor>> {
        self.all.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.all.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Shape: Send + Sync {}
    struct Circle;
    impl Shape for Circle {}

    fn descriptor(name: Option<&str>, interfaces: &[TypeKey]) -> Descriptor {
        let produced = TypeKey::of::<Circle>();
        let no_cast: ViewCast = Arc::new(|_: &AnyArc| None);
        let mut views = vec![View {
            key: produced,
            cast: no_cast.clone(),
        }];
        views.extend(interfaces.iter().map(|key| View {
            key: *key,
            cast: no_cast.clone(),
        }));
        let ctor: Ctor = Arc::new(|_: &Arguments| -> ComponentResult<AnyArc> { Ok(Arc::new(Circle)) });
        Descriptor::new(
            ComponentSource::Type,
            produced,
            name.map(str::to_owned),
            Vec::new(),
            HashMap::new(),
            BTreeSet::new(),
            views,
            None,
            ctor,
        )
    }

    #[test]
    fn test_indexes_under_produced_and_interface_types() {
        let mut registry = Registry::new();
        registry
            .register(descriptor(None, &[TypeKey::of::<dyn Shape>()]))
            .unwrap();

        assert_eq!(registry.lookup_by_type(&TypeKey::of::<Circle>()).len(), 1);
        assert_eq!(registry.lookup_by_type(&TypeKey::of::<dyn Shape>()).len(), 1);
        assert!(registry.lookup_by_type(&TypeKey::of::<String>()).is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = Registry::new();
        registry.register(descriptor(Some("circle"), &[])).unwrap();

        match registry.register(descriptor(Some("circle"), &[])) {
            Err(DiError::DuplicateName(name)) => assert_eq!(name, "circle"),
            _ => panic!("expected DuplicateName"),
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup_by_type(&TypeKey::of::<Circle>()).len(), 1);
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let mut registry = Registry::new();
        let first = registry.register(descriptor(Some("a"), &[])).unwrap();
        let second = registry.register(descriptor(Some("b"), &[])).unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert!(registry.lookup_by_name("b").unwrap().has_name("b"));
        assert!(registry.lookup_by_name("c").is_none());
    }
}
