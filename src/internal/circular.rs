//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};

/// Deepest nested construction allowed on one thread.
///
/// Each level costs a few stack frames of resolution machinery, so the bound
/// keeps a straight dependency chain inside a default 2 MiB thread stack in
/// unoptimized builds.
pub(crate) const MAX_DEPTH: usize = 64;

// Thread-local resolution state for circular dependency detection
thread_local! {
    static RESOLUTION_TLS: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
}

/// Marks a descriptor as under construction on the current thread.
///
/// Entered before the descriptor lock is taken, so a component that
/// transitively needs itself fails with [`DiError::Circular`] instead of
/// re-entering its own lock.
pub(crate) struct ResolutionFrame {
    id: usize,
}

impl ResolutionFrame {
    pub(crate) fn enter(id: usize, label: &str) -> DiResult<Self> {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();

            // Circular detection BEFORE pushing the new frame
            if let Some(start) = stack.iter().position(|(frame, _)| *frame == id) {
                let mut path: Vec<String> =
                    stack[start..].iter().map(|(_, l)| l.clone()).collect();
                path.push(label.to_string());
                return Err(DiError::Circular(path));
            }

            if stack.len() >= MAX_DEPTH {
                return Err(DiError::DepthExceeded(stack.len()));
            }

            stack.push((id, label.to_string()));
            Ok(Self { id })
        })
    }

    #[cfg(test)]
    pub(crate) fn depth() -> usize {
        RESOLUTION_TLS.with(|tls| tls.borrow().len())
    }
}

impl Drop for ResolutionFrame {
    fn drop(&mut self) {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|(frame, _)| *frame == self.id) {
                stack.truncate(pos);
            }
        });
    }
}
