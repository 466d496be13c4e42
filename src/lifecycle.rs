//! Creation-order tracking and the lifecycle passes.

use parking_lot::Mutex;

use crate::error::{DiError, DiResult, LifecyclePhase};
use crate::provider::Component;

/// Append-only record of instances in the order they were first created.
///
/// The lock only guards the list; hooks run with it released so they may
/// resolve further components.
#[derive(Default)]
pub(crate) struct CreationOrder {
    entries: Mutex<Vec<Component>>,
}

impl CreationOrder {
    pub(crate) fn push(&self, component: Component) {
        self.entries.lock().push(component);
    }

    pub(crate) fn snapshot(&self) -> Vec<Component> {
        self.entries.lock().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn get(&self, position: usize) -> Option<Component> {
        self.entries.lock().get(position).cloned()
    }

    fn pop(&self) -> Option<Component> {
        self.entries.lock().pop()
    }

    /// Runs `post_init` front to back; stops at the first failing hook.
    ///
    /// Walks by position so instances first created by an earlier hook are
    /// reached in the same pass.
    pub(crate) fn run_post_init(&self) -> DiResult<usize> {
        let mut invoked = 0;
        let mut position = 0;
        while let Some(component) = self.get(position) {
            position += 1;
            if let Some(hooks) = component.lifecycle() {
                tracing::trace!(component = component.label(), "post_init");
                hooks
                    .post_init()
                    .map_err(|source| hook_error(&component, LifecyclePhase::PostInit, source))?;
                invoked += 1;
            }
        }
        Ok(invoked)
    }

    /// Drains the list from the tail running `pre_destroy`; stops at the first
    /// failing hook, leaving the untouched entries in place.
    pub(crate) fn run_pre_destroy(&self) -> DiResult<usize> {
        let mut invoked = 0;
        while let Some(component) = self.pop() {
            if let Some(hooks) = component.lifecycle() {
                tracing::trace!(component = component.label(), "pre_destroy");
                hooks
                    .pre_destroy()
                    .map_err(|source| hook_error(&component, LifecyclePhase::PreDestroy, source))?;
                invoked += 1;
            }
        }
        Ok(invoked)
    }
}

fn hook_error(component: &Component, phase: LifecyclePhase, source: crate::BoxError) -> DiError {
    DiError::Lifecycle {
        component: component.label().to_string(),
        phase,
        source,
    }
}
