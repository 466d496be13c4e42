//! Component descriptors for introspection and diagnostics.

use crate::registration::{ComponentSource, Descriptor};

/// Snapshot of a registered component for introspection.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{ComponentCollection, ComponentDef, ComponentSource};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {}
/// struct SystemClock;
/// impl Clock for SystemClock {}
///
/// let mut components = ComponentCollection::new();
/// components
///     .register(
///         ComponentDef::function(|_| Ok(SystemClock))
///             .named("clock")
///             .profiles(["prod"])
///             .provides::<dyn Clock, _>(|c| c as Arc<dyn Clock>),
///     )
///     .unwrap();
///
/// let info = &components.components()[0];
/// assert_eq!(info.name.as_deref(), Some("clock"));
/// assert_eq!(info.source, ComponentSource::Function);
/// assert_eq!(info.profiles, vec!["prod".to_string()]);
/// assert!(info.provides.iter().any(|t| t.contains("Clock")));
/// assert!(!info.constructed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentInfo {
    /// Unique component name, if any
    pub name: Option<String>,
    /// Concrete produced type
    pub type_name: &'static str,
    /// How the component was declared
    pub source: ComponentSource,
    /// Every type the component resolves under, produced type first
    pub provides: Vec<&'static str>,
    /// Manifest parameters in order
    pub parameters: Vec<String>,
    /// Required profiles; empty means always eligible
    pub profiles: Vec<String>,
    /// Whether the component takes part in the lifecycle passes
    pub lifecycle: bool,
    /// Whether the instance has been created
    pub constructed: bool,
}

impl ComponentInfo {
    pub(crate) fn from_descriptor(descriptor: &Descriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            type_name: descriptor.produced.type_name(),
            source: descriptor.source,
            provides: descriptor.views.iter().map(|v| v.key.type_name()).collect(),
            parameters: descriptor
                .dependencies
                .iter()
                .map(|d| d.parameter().to_string())
                .collect(),
            profiles: descriptor.profiles.iter().cloned().collect(),
            lifecycle: descriptor.lifecycle.is_some(),
            constructed: descriptor.cached().is_some(),
        }
    }

    /// Whether the component is restricted to certain profiles.
    pub fn is_profiled(&self) -> bool {
        !self.profiles.is_empty()
    }
}
