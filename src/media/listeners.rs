// SPDX-License-Identifier: MPL-2.0
//! Event listener registry shared by an element and its handles.
//!
//! Listeners are detached by dropping the [`ListenerGuard`] returned at
//! registration, which gives the player deterministic teardown on unmount.

use super::element::{EventCallback, MediaEventKind};
use std::sync::{Arc, Mutex, Weak};

struct Listener {
    id: u64,
    kind: MediaEventKind,
    callback: Arc<dyn Fn() + Send + Sync + 'static>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// Cloneable set of event listeners.
#[derive(Clone, Default)]
pub struct EventTarget {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `callback` to `kind` until the returned guard is dropped.
    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn add_listener(&self, kind: MediaEventKind, callback: EventCallback) -> ListenerGuard {
        let Ok(mut registry) = self.registry.lock() else {
            tracing::warn!(event = kind.name(), "listener registry poisoned");
            return ListenerGuard::detached();
        };
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(Listener {
            id,
            kind,
            callback: Arc::from(callback),
        });

        ListenerGuard {
            registry: Arc::downgrade(&self.registry),
            id: Some(id),
        }
    }

    /// Invokes every listener registered for `kind`, in registration order.
    ///
    /// Callbacks run outside the registry lock, so a callback may register or
    /// drop listeners without deadlocking.
    pub fn dispatch(&self, kind: MediaEventKind) {
        let callbacks: Vec<_> = match self.registry.lock() {
            Ok(registry) => registry
                .listeners
                .iter()
                .filter(|listener| listener.kind == kind)
                .map(|listener| Arc::clone(&listener.callback))
                .collect(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback();
        }
    }

    /// Number of attached listeners across all kinds.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry
            .lock()
            .map(|registry| registry.listeners.len())
            .unwrap_or(0)
    }
}

/// Keeps one listener attached. Dropping it removes the listener.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Weak<Mutex<Registry>>,
    id: Option<u64>,
}

impl ListenerGuard {
    /// A guard attached to nothing.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            registry: Weak::new(),
            id: None,
        }
    }

    /// Whether the listener is still registered on a live target.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        let (Some(id), Some(registry)) = (self.id, self.registry.upgrade()) else {
            return false;
        };
        registry
            .lock()
            .map(|registry| registry.listeners.iter().any(|listener| listener.id == id))
            .unwrap_or(false)
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let (Some(id), Some(registry)) = (self.id.take(), self.registry.upgrade()) else {
            return;
        };
        if let Ok(mut registry) = registry.lock() {
            registry.listeners.retain(|listener| listener.id != id);
        }
    }
}
