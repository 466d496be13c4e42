//! Component container module for dependency injection.
//!
//! This module contains the [`Container`] type, which resolves registered
//! components, caches them as singletons and drives the lifecycle passes.

use std::sync::Arc;

use crate::descriptors::ComponentInfo;
use crate::error::{describe_request, DiError, DiResult};
use crate::internal::ResolutionFrame;
use crate::key::TypeKey;
use crate::lifecycle::CreationOrder;
use crate::profile::ActiveProfiles;
use crate::registration::{AnyArc, Descriptor, Registry};
use crate::traits::Resolver;
use crate::Arguments;

mod component;
pub use component::Component;

/// Container resolving components from a frozen registry.
///
/// The container is the explicit per-process context object: build it once
/// from a [`ComponentCollection`](crate::ComponentCollection) and pass it (or
/// clones of it, which share state) to whatever needs to resolve components.
///
/// # Thread Safety
///
/// Resolution may happen from any number of threads. Each component is
/// constructed at most once; racing first requests block on a per-component
/// lock while one of them constructs. Once constructed, reads take no lock.
///
/// # Examples
///
/// ```
/// use ferrous_inject::{ComponentCollection, ComponentDef, Resolver};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// let mut components = ComponentCollection::new();
/// components
///     .register(ComponentDef::function(|_| Ok(Database { url: "postgres://localhost".into() })).named("database"))
///     .unwrap()
///     .register(
///         ComponentDef::function(|args| Ok(UserService { db: args.get::<Database>("db")? }))
///             .named("users")
///             .arg::<Database>("db"),
///     )
///     .unwrap();
///
/// let container = components.build();
/// let users = container.get::<UserService>().unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

pub(crate) struct ContainerInner {
    registry: Registry,
    profiles: ActiveProfiles,
    creation_order: CreationOrder,
}

impl Container {
    pub(crate) fn new(registry: Registry, profiles: ActiveProfiles) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                registry,
                profiles,
                creation_order: CreationOrder::default(),
            }),
        }
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// The profile set eligibility is checked against.
    pub fn active_profiles(&self) -> &ActiveProfiles {
        &self.inner.profiles
    }

    /// Information about every registered component, eligible or not.
    pub fn components(&self) -> Vec<ComponentInfo> {
        self.inner
            .registry
            .iter()
            .map(|d| ComponentInfo::from_descriptor(d))
            .collect()
    }

    /// Instances created so far, in creation order.
    pub fn created(&self) -> Vec<Component> {
        self.inner.creation_order.snapshot()
    }

    /// Runs every `post_init` hook in creation order.
    ///
    /// Components first resolved from inside a hook join the end of the
    /// creation order and get their own `post_init` later in the same pass.
    /// The first failing hook aborts the pass and its error is returned.
    pub fn post_init(&self) -> DiResult<()> {
        let invoked = self.inner.creation_order.run_post_init()?;
        tracing::info!(hooks = invoked, "post_init pass complete");
        Ok(())
    }

    /// Drains the creation order from the most recent instance, running
    /// every `pre_destroy` hook.
    ///
    /// The first failing hook aborts the pass and its error is returned.
    pub fn pre_destroy(&self) -> DiResult<()> {
        let invoked = self.inner.creation_order.run_pre_destroy()?;
        tracing::info!(hooks = invoked, "pre_destroy pass complete");
        Ok(())
    }

    /// Narrows a request to exactly one eligible descriptor.
    pub(crate) fn select(
        &self,
        type_key: Option<&TypeKey>,
        name: Option<&str>,
    ) -> DiResult<Arc<Descriptor>> {
        let registry = &self.inner.registry;
        let candidates: Vec<&Arc<Descriptor>> = match (type_key, name) {
            (Some(key), _) => registry.lookup_by_type(key).iter().collect(),
            (None, Some(name)) => registry.lookup_by_name(name).into_iter().collect(),
            (None, None) => {
                return Err(DiError::configuration(
                    "component request needs a type or a name",
                ))
            }
        };

        let mut eligible: Vec<&Arc<Descriptor>> = candidates
            .into_iter()
            .filter(|d| d.is_eligible(&self.inner.profiles))
            .collect();

        if eligible.len() > 1 {
            if let Some(name) = name {
                eligible.retain(|d| d.has_name(name));
            }
        }

        let type_name = type_key.map(TypeKey::type_name);
        match eligible.as_slice() {
            [] => Err(DiError::not_found(type_name, name)),
            [single] => Ok(Arc::clone(single)),
            many => Err(DiError::Ambiguous {
                requested: describe_request(type_name, name),
                candidates: many.iter().map(|d| d.label.clone()).collect(),
            }),
        }
    }

    /// Returns the cached instance, constructing it on first demand.
    fn instantiate(&self, descriptor: &Arc<Descriptor>) -> DiResult<AnyArc> {
        // Fast path: no lock once constructed
        if let Some(instance) = descriptor.cached() {
            tracing::trace!(component = %descriptor.label, "cache hit");
            return Ok(instance.clone());
        }

        let _frame = ResolutionFrame::enter(descriptor.id, &descriptor.label)?;
        let _guard = descriptor.lock.lock();

        // Another thread may have finished construction while we waited
        if let Some(instance) = descriptor.cached() {
            return Ok(instance.clone());
        }

        let mut values = Vec::with_capacity(descriptor.dependencies.len());
        for dependency in &descriptor.dependencies {
            let requirement = descriptor.requirement(dependency);
            let argument = self.get_component(requirement.type_key.as_ref(), requirement.name)?;
            values.push((dependency.parameter().to_string(), argument));
        }

        let instance = (descriptor.ctor)(&Arguments::new(values)).map_err(|source| {
            DiError::Construction {
                component: descriptor.label.clone(),
                source,
            }
        })?;

        let instance = descriptor.instance.get_or_init(|| instance).clone();
        self.inner
            .creation_order
            .push(Component::new(descriptor.clone(), instance.clone()));
        tracing::debug!(
            component = %descriptor.label,
            position = self.inner.creation_order.len(),
            "constructed component"
        );
        Ok(instance)
    }
}

impl Resolver for Container {
    fn get_component(
        &self,
        type_key: Option<&TypeKey>,
        name: Option<&str>,
    ) -> DiResult<Component> {
        let descriptor = self.select(type_key, name)?;
        let instance = self.instantiate(&descriptor)?;
        Ok(Component::new(descriptor, instance))
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("components", &self.inner.registry.len())
            .field("created", &self.inner.creation_order.len())
            .field("profiles", &self.inner.profiles)
            .finish()
    }
}
