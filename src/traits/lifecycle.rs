//! Lifecycle hooks run around the application body.

use crate::error::ComponentResult;

/// Optional lifecycle capability of a component.
///
/// A component opts in with [`ComponentDef::with_lifecycle`]; the container
/// then calls `post_init` for every created instance in creation order before
/// the program body, and `pre_destroy` in reverse creation order after it.
/// Both hooks default to doing nothing, so a component implements only the
/// one it needs.
///
/// # Examples
///
/// ```
/// use ferrous_inject::{ComponentCollection, ComponentDef, ComponentResult, Lifecycle, Resolver};
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// #[derive(Default)]
/// struct Cache {
///     warm: AtomicBool,
/// }
///
/// impl Lifecycle for Cache {
///     fn post_init(&self) -> ComponentResult<()> {
///         self.warm.store(true, Ordering::SeqCst);
///         Ok(())
///     }
/// }
///
/// let mut components = ComponentCollection::new();
/// components
///     .register(ComponentDef::function(|_| Ok(Cache::default())).named("cache").with_lifecycle())
///     .unwrap();
///
/// let container = components.build();
/// let cache = container.get::<Cache>().unwrap();
/// container.post_init().unwrap();
/// assert!(cache.warm.load(Ordering::SeqCst));
/// container.pre_destroy().unwrap();
/// ```
///
/// [`ComponentDef::with_lifecycle`]: crate::ComponentDef::with_lifecycle
pub trait Lifecycle: Send + Sync + 'static {
    /// Called once after the dependency graph has been built.
    fn post_init(&self) -> ComponentResult<()> {
        Ok(())
    }

    /// Called once during teardown, dependents before their dependencies.
    fn pre_destroy(&self) -> ComponentResult<()> {
        Ok(())
    }
}
