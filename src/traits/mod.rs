//! Core traits for the dependency injection container.

mod lifecycle;
mod resolver;

pub use lifecycle::Lifecycle;
pub use resolver::Resolver;
