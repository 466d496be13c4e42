//! Component collection module for dependency injection.
//!
//! This module contains the [`ComponentCollection`] registration builder, the
//! [`ComponentDef`] descriptor builder and the [`Injectable`] trait for
//! self-registering types.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::dependency::{Arguments, Dependency, Inject};
use crate::descriptors::ComponentInfo;
use crate::error::{ComponentResult, DiError, DiResult};
use crate::key::TypeKey;
use crate::profile::{normalize, ActiveProfiles};
use crate::registration::{
    AnyArc, ComponentSource, Ctor, Descriptor, LifecycleCast, Registry, View, ViewCast,
};
use crate::traits::Lifecycle;
use crate::Container;

pub mod module_system;
pub use module_system::*;

/// A type that knows how to construct itself from its dependencies.
///
/// `dependencies` is the static manifest: one entry per constructor
/// parameter, in the order the constructor reads them. `configure` may
/// declare interfaces, a name, profiles or lifecycle participation.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{
///     Arguments, ComponentCollection, ComponentResult, Dependency, Injectable, Resolver,
/// };
/// use std::sync::Arc;
///
/// struct Stub {
///     value: i32,
/// }
///
/// impl Injectable for Stub {
///     fn construct(_: &Arguments) -> ComponentResult<Self> {
///         Ok(Stub { value: 1 })
///     }
/// }
///
/// struct Dependent {
///     stub: Arc<Stub>,
/// }
///
/// impl Injectable for Dependent {
///     fn dependencies() -> Vec<Dependency> {
///         vec![Dependency::typed::<Stub>("stub")]
///     }
///
///     fn construct(args: &Arguments) -> ComponentResult<Self> {
///         Ok(Dependent { stub: args.get::<Stub>("stub")? })
///     }
/// }
///
/// let mut components = ComponentCollection::new();
/// components.register_component::<Stub>().unwrap();
/// components.register_component::<Dependent>().unwrap();
///
/// let container = components.build();
/// let dependent = container.get::<Dependent>().unwrap();
/// assert_eq!(dependent.stub.value, 1);
/// assert!(Arc::ptr_eq(&dependent.stub, &container.get::<Stub>().unwrap()));
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Ordered dependency manifest. Defaults to no dependencies.
    fn dependencies() -> Vec<Dependency> {
        Vec::new()
    }

    /// Builds the component from its resolved arguments.
    fn construct(args: &Arguments) -> ComponentResult<Self>;

    /// Adjusts the default definition, e.g. to add interfaces.
    fn configure(def: ComponentDef<Self>) -> ComponentDef<Self> {
        def
    }
}

/// Builder for a single component registration.
///
/// Produced either from an [`Injectable`] type ([`ComponentDef::component`])
/// or from a standalone constructor ([`ComponentDef::function`]). Either way
/// the component is indexed under `T`; [`provides`](Self::provides) adds
/// further types, typically trait objects, it can be resolved under.
pub struct ComponentDef<T> {
    source: ComponentSource,
    name: Option<String>,
    identifier: Option<String>,
    dependencies: Vec<Dependency>,
    overrides: Vec<(String, Inject)>,
    profiles: BTreeSet<String>,
    views: Vec<View>,
    lifecycle: Option<LifecycleCast>,
    ctor: Ctor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> ComponentDef<T> {
    fn new(source: ComponentSource, identifier: Option<String>, dependencies: Vec<Dependency>, ctor: Ctor) -> Self {
        let own: ViewCast = Arc::new(|instance: &AnyArc| {
            instance
                .clone()
                .downcast::<T>()
                .ok()
                .map(|typed| Arc::new(typed) as AnyArc)
        });
        Self {
            source,
            name: None,
            identifier,
            dependencies,
            overrides: Vec::new(),
            profiles: BTreeSet::new(),
            views: vec![View {
                key: TypeKey::of::<T>(),
                cast: own,
            }],
            lifecycle: None,
            ctor,
            _marker: PhantomData,
        }
    }

    /// Definition for a self-registering type.
    pub fn component() -> Self
    where
        T: Injectable,
    {
        let ctor: Ctor = Arc::new(|args: &Arguments| -> ComponentResult<AnyArc> {
            Ok(Arc::new(T::construct(args)?))
        });
        T::configure(Self::new(ComponentSource::Type, None, T::dependencies(), ctor))
    }

    /// Definition for a standalone constructor function.
    ///
    /// Named functions default the component name to their own identifier;
    /// closures must be given a name with [`named`](Self::named).
    pub fn function<F>(constructor: F) -> Self
    where
        F: Fn(&Arguments) -> ComponentResult<T> + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |args: &Arguments| -> ComponentResult<AnyArc> {
            Ok(Arc::new(constructor(args)?))
        });
        Self::new(
            ComponentSource::Function,
            function_identifier::<F>().map(str::to_owned),
            Vec::new(),
            ctor,
        )
    }

    /// Sets the unique component name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a parameter declared with type `U` to the manifest.
    pub fn arg<U: ?Sized + 'static>(mut self, parameter: impl Into<String>) -> Self {
        self.dependencies.push(Dependency::typed::<U>(parameter));
        self
    }

    /// Appends a parameter without a type hint; it resolves by its name.
    pub fn arg_untyped(mut self, parameter: impl Into<String>) -> Self {
        self.dependencies.push(Dependency::untyped(parameter));
        self
    }

    /// Overrides how `parameter` is resolved.
    pub fn inject(mut self, parameter: impl Into<String>, inject: Inject) -> Self {
        self.overrides.push((parameter.into(), inject));
        self
    }

    /// Restricts the component to the given profiles.
    pub fn profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.profiles.extend(normalize(profiles));
        self
    }

    /// Makes the component resolvable as `U` as well.
    ///
    /// `cast` is usually an unsizing coercion such as
    /// `|c| c as Arc<dyn Trait>`; it must return the same allocation.
    pub fn provides<U, F>(mut self, cast: F) -> Self
    where
        U: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<U> + Send + Sync + 'static,
    {
        let key = TypeKey::of::<U>();
        let view: ViewCast = Arc::new(move |instance: &AnyArc| {
            instance
                .clone()
                .downcast::<T>()
                .ok()
                .map(|typed| Arc::new(cast(typed)) as AnyArc)
        });
        match self.views.iter_mut().find(|v| v.key == key) {
            Some(existing) => existing.cast = view,
            None => self.views.push(View { key, cast: view }),
        }
        self
    }

    /// Enrolls the component in the lifecycle passes.
    pub fn with_lifecycle(mut self) -> Self
    where
        T: Lifecycle,
    {
        self.lifecycle = Some(Arc::new(|instance: &AnyArc| {
            instance
                .clone()
                .downcast::<T>()
                .ok()
                .map(|typed| typed as Arc<dyn Lifecycle>)
        }));
        self
    }

    pub(crate) fn into_descriptor(self) -> DiResult<Descriptor> {
        let produced = TypeKey::of::<T>();

        let name = match (self.name, self.source) {
            (Some(name), _) if name.trim().is_empty() => {
                return Err(DiError::configuration(format!(
                    "component {} has an empty name",
                    produced
                )));
            }
            (Some(name), _) => Some(name),
            (None, ComponentSource::Function) => match self.identifier {
                Some(identifier) => Some(identifier),
                None => {
                    return Err(DiError::configuration(format!(
                        "constructor for {} has no identifier; give it an explicit name",
                        produced
                    )));
                }
            },
            (None, ComponentSource::Type) => None,
        };

        let mut seen = HashSet::new();
        for dependency in &self.dependencies {
            if !seen.insert(dependency.parameter()) {
                return Err(DiError::configuration(format!(
                    "parameter '{}' declared twice for {}",
                    dependency.parameter(),
                    produced
                )));
            }
        }

        let mut overrides = HashMap::new();
        for (parameter, inject) in self.overrides {
            if !seen.contains(parameter.as_str()) {
                return Err(DiError::configuration(format!(
                    "override for unknown parameter '{}' of {}",
                    parameter, produced
                )));
            }
            if let Inject::Name(target) = &inject {
                if target.trim().is_empty() {
                    return Err(DiError::configuration(format!(
                        "override for parameter '{}' of {} names no component",
                        parameter, produced
                    )));
                }
            }
            overrides.insert(parameter, inject);
        }

        Ok(Descriptor::new(
            self.source,
            produced,
            name,
            self.dependencies,
            overrides,
            self.profiles,
            self.views,
            self.lifecycle,
            self.ctor,
        ))
    }
}

/// Identifier of a named function item, `None` for closures and pointers.
fn function_identifier<F>() -> Option<&'static str> {
    let full = std::any::type_name::<F>();
    if full.contains("{{") || full.contains('(') || full.contains(' ') {
        return None;
    }
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().filter(|ident| !ident.is_empty())
}

/// Registration builder.
///
/// Owns the registry while components are registered; [`build`](Self::build)
/// freezes it into a [`Container`].
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{ComponentCollection, ComponentDef, Resolver};
///
/// fn simple(_: &ferrous_inject::Arguments) -> ferrous_inject::ComponentResult<i32> {
///     Ok(1)
/// }
///
/// fn composite(args: &ferrous_inject::Arguments) -> ferrous_inject::ComponentResult<i32> {
///     Ok(2 + *args.get::<i32>("simple")?)
/// }
///
/// let mut components = ComponentCollection::new();
/// components.register_constructor(simple).unwrap();
/// components
///     .register(ComponentDef::function(composite).arg_untyped("simple"))
///     .unwrap();
///
/// let container = components.build();
/// assert_eq!(*container.get_by_name::<i32>("composite").unwrap(), 3);
/// ```
pub struct ComponentCollection {
    registry: Registry,
    profiles: Option<ActiveProfiles>,
}

impl ComponentCollection {
    /// Creates a new empty component collection.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            profiles: None,
        }
    }

    /// Uses `profiles` instead of the process wide environment set.
    pub fn with_active_profiles(&mut self, profiles: ActiveProfiles) -> &mut Self {
        self.profiles = Some(profiles);
        self
    }

    /// Registers a fully configured definition.
    pub fn register<T: Send + Sync + 'static>(&mut self, def: ComponentDef<T>) -> DiResult<&mut Self> {
        let descriptor = self.registry.register(def.into_descriptor()?)?;
        tracing::debug!(
            component = %descriptor.label,
            dependencies = descriptor.dependencies.len(),
            interfaces = descriptor.views.len() - 1,
            "registered component"
        );
        Ok(self)
    }

    /// Registers a self-registering type with its default definition.
    pub fn register_component<T: Injectable>(&mut self) -> DiResult<&mut Self> {
        self.register(ComponentDef::<T>::component())
    }

    /// Registers a named constructor function without dependencies.
    ///
    /// The component name is the function's identifier. Use
    /// [`ComponentDef::function`] to declare arguments or other options.
    pub fn register_constructor<T, F>(&mut self, constructor: F) -> DiResult<&mut Self>
    where
        T: Send + Sync + 'static,
        F: Fn(&Arguments) -> ComponentResult<T> + Send + Sync + 'static,
    {
        self.register(ComponentDef::function(constructor))
    }

    /// Registered components in registration order.
    pub fn components(&self) -> Vec<ComponentInfo> {
        self.registry.iter().map(|d| ComponentInfo::from_descriptor(d)).collect()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Freezes the registry into a container.
    pub fn build(self) -> Container {
        let profiles = self
            .profiles
            .unwrap_or_else(|| ActiveProfiles::process().clone());
        tracing::debug!(
            components = self.registry.len(),
            profiles = %profiles,
            "building container"
        );
        Container::new(self.registry, profiles)
    }
}

impl Default for ComponentCollection {
    fn default() -> Self {
        Self::new()
    }
}
