//! Opaque execution-context handle keyed by identity.

use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

struct WindowToken {
    label: String,
}

/// Handle to a peer's execution context (a browser window or frame).
///
/// The registries never dereference a handle; they only compare it. Two handles are equal
/// iff one was cloned from the other, regardless of their labels. The label exists for
/// diagnostics only.
#[derive(Clone)]
pub struct WindowHandle {
    token: Arc<WindowToken>,
}

impl WindowHandle {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            token: Arc::new(WindowToken {
                label: label.into(),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.token.label
    }
}

impl Hash for WindowHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.token).hash(state);
    }
}

impl PartialEq for WindowHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.token, &other.token)
    }
}

impl Eq for WindowHandle {}

impl Debug for WindowHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WindowHandle").field(&self.label()).finish()
    }
}
