//! Component modules for grouped registration.

use crate::{ComponentCollection, DiResult};

/// A group of registrations applied to a [`ComponentCollection`] together.
///
/// # Example
///
/// ```rust
/// use ferrous_inject::{
///     ComponentCollection, ComponentCollectionExt, ComponentDef, ComponentModule, DiResult,
///     Resolver,
/// };
///
/// struct Settings {
///     url: String,
/// }
///
/// struct StorageModule;
///
/// impl ComponentModule for StorageModule {
///     fn register_components(self, components: &mut ComponentCollection) -> DiResult<()> {
///         components.register(
///             ComponentDef::function(|_| Ok(Settings { url: "postgres://localhost".into() }))
///                 .named("settings"),
///         )?;
///         Ok(())
///     }
/// }
///
/// # fn main() -> DiResult<()> {
/// let container = ComponentCollection::new().add_module(StorageModule)?.build();
/// assert_eq!(container.get::<Settings>()?.url, "postgres://localhost");
/// # Ok(())
/// # }
/// ```
pub trait ComponentModule {
    /// Register this module's components with the collection.
    fn register_components(self, components: &mut ComponentCollection) -> DiResult<()>;
}

/// Extension trait adding module registration to [`ComponentCollection`].
pub trait ComponentCollectionExt {
    /// Applies a module, consuming and returning the collection.
    fn add_module<M: ComponentModule>(self, module: M) -> DiResult<Self>
    where
        Self: Sized;

    /// Applies a module in place.
    fn add_module_mut<M: ComponentModule>(&mut self, module: M) -> DiResult<&mut Self>;
}

impl ComponentCollectionExt for ComponentCollection {
    fn add_module<M: ComponentModule>(mut self, module: M) -> DiResult<Self> {
        module.register_components(&mut self)?;
        Ok(self)
    }

    fn add_module_mut<M: ComponentModule>(&mut self, module: M) -> DiResult<&mut Self> {
        module.register_components(self)?;
        Ok(self)
    }
}
