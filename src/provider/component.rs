//! Handles to resolved component instances.

use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;
use crate::registration::{AnyArc, Descriptor};
use crate::traits::Lifecycle;

/// A resolved component instance together with its descriptor.
///
/// Cloning the handle is cheap and never clones the instance itself.
#[derive(Clone)]
pub struct Component {
    descriptor: Arc<Descriptor>,
    instance: AnyArc,
}

impl Component {
    pub(crate) fn new(descriptor: Arc<Descriptor>, instance: AnyArc) -> Self {
        Self {
            descriptor,
            instance,
        }
    }

    /// The component name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.descriptor.name.as_deref()
    }

    /// Name of the concrete type the component produces.
    pub fn type_name(&self) -> &'static str {
        self.descriptor.produced.type_name()
    }

    /// Whether the component can be viewed as `U`.
    pub fn provides<U: ?Sized + 'static>(&self) -> bool {
        self.descriptor.provides(&TypeKey::of::<U>())
    }

    /// Views the instance as `Arc<U>`.
    ///
    /// `U` must be the produced type or one of the declared interfaces;
    /// every view shares the same allocation.
    pub fn downcast<U: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<U>> {
        self.descriptor
            .view(&TypeKey::of::<U>(), &self.instance)
            .and_then(|erased| erased.downcast::<Arc<U>>().ok())
            .map(|typed| (*typed).clone())
            .ok_or_else(|| DiError::TypeMismatch {
                expected: std::any::type_name::<U>(),
                component: self.descriptor.label.clone(),
            })
    }

    /// Whether both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }

    pub(crate) fn label(&self) -> &str {
        &self.descriptor.label
    }

    pub(crate) fn lifecycle(&self) -> Option<Arc<dyn Lifecycle>> {
        self.descriptor
            .lifecycle
            .as_ref()
            .and_then(|cast| cast(&self.instance))
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.descriptor.name)
            .field("type", &self.descriptor.produced.type_name())
            .finish()
    }
}
