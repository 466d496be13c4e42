//! # ferrous-inject
//!
//! Runtime dependency injection for Rust: components are registered with an
//! ordered dependency manifest, resolved lazily as singletons, filtered by
//! active profiles and taken through `post_init` / `pre_destroy` hooks.
//!
//! ## Features
//!
//! - **Lazy singletons**: each component is constructed once, on first demand, even under concurrent requests
//! - **Named components**: globally unique names, resolution by type, by name, or type narrowed by name
//! - **Interfaces**: components declare the trait objects they can be resolved as
//! - **Profiles**: components restricted to profiles listed in `FERROUS_PROFILES`
//! - **Lifecycle hooks**: forward `post_init` and reverse `pre_destroy` passes over creation order
//! - **Circular dependency detection**: cycles fail with the full resolution path
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_inject::{
//!     Arguments, ComponentCollection, ComponentDef, ComponentResult, Dependency, Injectable,
//!     Resolver,
//! };
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self, who: &str) -> String;
//! }
//!
//! struct Settings {
//!     greeting: String,
//! }
//!
//! struct FriendlyGreeter {
//!     settings: Arc<Settings>,
//! }
//!
//! impl Greeter for FriendlyGreeter {
//!     fn greet(&self, who: &str) -> String {
//!         format!("{}, {}!", self.settings.greeting, who)
//!     }
//! }
//!
//! impl Injectable for FriendlyGreeter {
//!     fn dependencies() -> Vec<Dependency> {
//!         vec![Dependency::typed::<Settings>("settings")]
//!     }
//!
//!     fn construct(args: &Arguments) -> ComponentResult<Self> {
//!         Ok(FriendlyGreeter { settings: args.get::<Settings>("settings")? })
//!     }
//!
//!     fn configure(def: ComponentDef<Self>) -> ComponentDef<Self> {
//!         def.provides::<dyn Greeter, _>(|g| g as Arc<dyn Greeter>)
//!     }
//! }
//!
//! let mut components = ComponentCollection::new();
//! components
//!     .register(
//!         ComponentDef::function(|_| Ok(Settings { greeting: "Hello".into() })).named("settings"),
//!     )
//!     .unwrap();
//! components.register_component::<FriendlyGreeter>().unwrap();
//!
//! let container = components.build();
//! let greeter = container.get::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet("world"), "Hello, world!");
//! ```
//!
//! ## Profiles
//!
//! ```rust
//! use ferrous_inject::{ActiveProfiles, ComponentCollection, ComponentDef, Resolver};
//!
//! struct Mailer(&'static str);
//!
//! let mut components = ComponentCollection::new();
//! components
//!     .with_active_profiles(ActiveProfiles::parse("prod"))
//!     .register(ComponentDef::function(|_| Ok(Mailer("smtp"))).named("smtp").profiles(["prod"]))
//!     .unwrap()
//!     .register(ComponentDef::function(|_| Ok(Mailer("stdout"))).named("stdout").profiles(["dev"]))
//!     .unwrap();
//!
//! let container = components.build();
//! assert_eq!(container.get::<Mailer>().unwrap().0, "smtp");
//! ```

// Module declarations
pub mod application;
pub mod collection;
pub mod dependency;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod profile;
pub mod provider;
pub mod traits;
pub mod validation;

// Internal modules
mod internal;
mod lifecycle;
mod registration;

// Re-exports
pub use application::{
    exit_code, launch, run_application, run_async_application, Application, AsyncApplication,
};
pub use collection::{
    ComponentCollection, ComponentCollectionExt, ComponentDef, ComponentModule, Injectable,
};
pub use dependency::{Arguments, Dependency, Inject};
pub use descriptors::ComponentInfo;
pub use error::{BoxError, ComponentResult, DiError, DiResult, LifecyclePhase};
pub use key::TypeKey;
pub use profile::{ActiveProfiles, PROFILES_ENV};
pub use provider::{Component, Container};
pub use registration::ComponentSource;
pub use traits::{Lifecycle, Resolver};
pub use validation::{ValidationError, ValidationResult};
