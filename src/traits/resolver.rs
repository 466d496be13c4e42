//! Resolver trait for component resolution.

use std::sync::Arc;

use crate::error::DiResult;
use crate::key::TypeKey;
use crate::provider::Component;

/// Component resolution interface.
///
/// [`get_component`](Self::get_component) is the single erased entry point: a
/// request names a type, a name, or both. The typed helpers build on it and
/// view the resolved instance as `Arc<U>`.
///
/// # Examples
///
/// ```
/// use ferrous_inject::{ComponentCollection, ComponentDef, Resolver, TypeKey};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// let mut components = ComponentCollection::new();
/// components
///     .register(
///         ComponentDef::function(|_| Ok(English))
///             .named("english")
///             .provides::<dyn Greeter, _>(|e| e as Arc<dyn Greeter>),
///     )
///     .unwrap();
///
/// let container = components.build();
///
/// let by_interface = container.get::<dyn Greeter>().unwrap();
/// let by_name = container.get_by_name::<English>("english").unwrap();
/// assert_eq!(by_interface.greet(), "hello");
///
/// let erased = container
///     .get_component(Some(&TypeKey::of::<dyn Greeter>()), None)
///     .unwrap();
/// assert_eq!(erased.name(), Some("english"));
/// # let _ = by_name;
/// ```
pub trait Resolver {
    /// Resolves the single eligible component matching `type_key` and/or `name`.
    ///
    /// At least one of the two must be supplied. With a type, candidates are
    /// every component provided under that type and the name only narrows an
    /// ambiguous set; without a type, the name alone selects the component.
    fn get_component(&self, type_key: Option<&TypeKey>, name: Option<&str>)
        -> DiResult<Component>;

    /// Resolves a component by type.
    fn get<U: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<U>>
    where
        Self: Sized,
    {
        self.get_component(Some(&TypeKey::of::<U>()), None)?
            .downcast::<U>()
    }

    /// Resolves a component by type, using `name` to break ties.
    fn get_named<U: ?Sized + Send + Sync + 'static>(&self, name: &str) -> DiResult<Arc<U>>
    where
        Self: Sized,
    {
        self.get_component(Some(&TypeKey::of::<U>()), Some(name))?
            .downcast::<U>()
    }

    /// Resolves a component purely by name and views it as `U`.
    fn get_by_name<U: ?Sized + Send + Sync + 'static>(&self, name: &str) -> DiResult<Arc<U>>
    where
        Self: Sized,
    {
        self.get_component(None, Some(name))?.downcast::<U>()
    }
}
