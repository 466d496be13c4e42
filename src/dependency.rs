//! Dependency manifests and resolved constructor arguments.
//!
//! Constructors never inspect their own signature. Each registration carries
//! an ordered manifest of [`Dependency`] entries; at construction time every
//! entry is turned into a `(type?, name?)` request, resolved, and handed to the
//! constructor through [`Arguments`].

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;
use crate::provider::Component;

/// One constructor parameter in a dependency manifest.
///
/// A typed parameter is resolved by its declared type and may be narrowed by
/// its parameter name when several candidates exist. An untyped parameter is
/// resolved by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    parameter: String,
    type_key: Option<TypeKey>,
}

impl Dependency {
    /// Parameter declared with type `U`.
    pub fn typed<U: ?Sized + 'static>(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            type_key: Some(TypeKey::of::<U>()),
        }
    }

    /// Parameter without a type hint; resolved purely by its name.
    pub fn untyped(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            type_key: None,
        }
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn type_key(&self) -> Option<TypeKey> {
        self.type_key
    }
}

/// Per-argument injection override.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Inject, TypeKey};
///
/// trait Store: Send + Sync {}
///
/// let by_name = Inject::name("primary_store");
/// let by_type = Inject::of::<dyn Store>();
/// assert_eq!(by_type, Inject::Type(TypeKey::of::<dyn Store>()));
/// assert_ne!(by_name, by_type);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inject {
    /// Resolve purely by this component name; the declared type is ignored.
    Name(String),
    /// Resolve purely by this type; the parameter name is ignored.
    Type(TypeKey),
}

impl Inject {
    pub fn name(name: impl Into<String>) -> Self {
        Inject::Name(name.into())
    }

    pub fn of<U: ?Sized + 'static>() -> Self {
        Inject::Type(TypeKey::of::<U>())
    }
}

/// A resolved `(type?, name?)` request for one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Requirement<'a> {
    pub(crate) type_key: Option<TypeKey>,
    pub(crate) name: Option<&'a str>,
}

impl<'a> Requirement<'a> {
    /// Routes a manifest entry through its optional override.
    pub(crate) fn route(dependency: &'a Dependency, inject: Option<&'a Inject>) -> Self {
        match inject {
            Some(Inject::Name(name)) => Self {
                type_key: None,
                name: Some(name),
            },
            Some(Inject::Type(key)) => Self {
                type_key: Some(*key),
                name: None,
            },
            None => Self {
                type_key: dependency.type_key,
                name: Some(&dependency.parameter),
            },
        }
    }
}

/// Arguments resolved for a single constructor call, in manifest order.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{ComponentCollection, ComponentDef, Resolver};
///
/// let mut components = ComponentCollection::new();
/// components
///     .register(ComponentDef::function(|_| Ok(40u32)).named("base"))
///     .unwrap()
///     .register(
///         ComponentDef::function(|args| Ok(*args.get::<u32>("base")? as u64 + 2))
///             .named("answer")
///             .arg_untyped("base"),
///     )
///     .unwrap();
///
/// let container = components.build();
/// assert_eq!(*container.get::<u64>().unwrap(), 42);
/// ```
pub struct Arguments {
    values: Vec<(String, Component)>,
}

impl Arguments {
    pub(crate) fn new(values: Vec<(String, Component)>) -> Self {
        Self { values }
    }

    /// The argument for `parameter`, viewed as `Arc<U>`.
    pub fn get<U: ?Sized + Send + Sync + 'static>(&self, parameter: &str) -> DiResult<Arc<U>> {
        self.component(parameter)?.downcast::<U>()
    }

    /// The resolved component handle for `parameter`.
    pub fn component(&self, parameter: &str) -> DiResult<&Component> {
        self.values
            .iter()
            .find(|(p, _)| p == parameter)
            .map(|(_, c)| c)
            .ok_or_else(|| {
                DiError::configuration(format!(
                    "constructor asked for undeclared parameter '{}'",
                    parameter
                ))
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameter names in manifest order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(p, _)| p.as_str())
    }
}
