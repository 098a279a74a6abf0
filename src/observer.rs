//! Callback registries notified whenever a handle logs an error at an enabled level.
//!
//! Every [`Logs`](crate::Logs) factory owns one process-wide registry and every
//! [`Log`](crate::Log) handle owns its own. Membership is by identity: the same
//! `Arc` added twice is kept once, in the position it was first added.

use crate::internal;
use parking_lot::ReentrantMutex;
use std::any::Any;
use std::cell::RefCell;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// The handler type stored by error registries.
pub type ErrorObserver = Arc<dyn Fn(&(dyn Error + 'static)) + Send + Sync>;

/// Registry of error observers.
pub type ErrorObservers = ObserverRegistry<dyn Error + 'static>;

/// Wraps a closure as an [`ErrorObserver`]. Keep the returned `Arc` around
/// if the observer should be removed later.
pub fn observer<F>(f: F) -> ErrorObserver
where
    F: Fn(&(dyn Error + 'static)) + Send + Sync + 'static,
{
    Arc::new(f)
}

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Ordered set of handlers behind a single reentrant lock.
///
/// The lock is held for the whole dispatch loop, so `add` and `remove` from other
/// threads wait until every handler has run. The owning thread may re-enter: a
/// handler can log another error through any handle, or add and remove handlers
/// on this registry, which then take effect from the next dispatch.
pub struct ObserverRegistry<T: ?Sized + 'static> {
    handlers: ReentrantMutex<RefCell<Vec<Handler<T>>>>,
}

impl<T: ?Sized + 'static> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self {
            handlers: ReentrantMutex::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: ?Sized + 'static> fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("handlers", &self.len())
            .finish()
    }
}

impl<T: ?Sized + 'static> ObserverRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` unless this exact `Arc` is already registered.
    pub fn add(&self, handler: &Handler<T>) -> &Self {
        let guard = self.handlers.lock();
        let mut handlers = guard.borrow_mut();
        if !handlers.iter().any(|h| same_handler(h, handler)) {
            handlers.push(Arc::clone(handler));
        }
        self
    }

    /// No-op when `handler` is not registered.
    pub fn remove(&self, handler: &Handler<T>) -> &Self {
        let guard = self.handlers.lock();
        guard.borrow_mut().retain(|h| !same_handler(h, handler));
        self
    }

    #[must_use]
    pub fn contains(&self, handler: &Handler<T>) -> bool {
        let guard = self.handlers.lock();
        guard.borrow().iter().any(|h| same_handler(h, handler))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let guard = self.handlers.lock();
        guard.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every handler in insertion order with `value`.
    ///
    /// Iterates over the handlers registered when the call started, with the
    /// lock held throughout. A panicking handler is reported to the diagnostic
    /// logger and the remaining handlers still run.
    pub fn dispatch(&self, value: &T) {
        let guard = self.handlers.lock();
        // Released before any handler runs, so handlers may mutate the list.
        let handlers: Vec<Handler<T>> = guard.borrow().clone();
        for (index, handler) in handlers.iter().enumerate() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| handler(value))) {
                internal::warn(
                    "OBSERVER",
                    &format!("observer #{index} panicked: {}", panic_message(&*payload)),
                );
            }
        }
        drop(guard);
    }
}

fn same_handler<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use std::sync::Mutex;

    type Calls = Arc<Mutex<Vec<String>>>;

    fn recording(calls: &Calls, tag: &'static str) -> Arc<dyn Fn(&str) + Send + Sync> {
        let calls = Arc::clone(calls);
        Arc::new(move |value: &str| calls.lock().unwrap().push(format!("{tag}:{value}")))
    }

    #[test]
    fn dispatch_follows_insertion_order() {
        let calls = Calls::default();
        let registry = ObserverRegistry::<str>::new();
        registry
            .add(&recording(&calls, "a"))
            .add(&recording(&calls, "b"))
            .add(&recording(&calls, "c"));

        registry.dispatch("x");

        assert_eq!(*calls.lock().unwrap(), vec!["a:x", "b:x", "c:x"]);
    }

    #[test]
    fn re_adding_keeps_one_entry_in_original_position() {
        let calls = Calls::default();
        let registry = ObserverRegistry::<str>::new();
        let a = recording(&calls, "a");
        let b = recording(&calls, "b");
        registry.add(&a).add(&b).add(&a);

        registry.dispatch("x");

        assert_eq!(registry.len(), 2);
        assert_eq!(*calls.lock().unwrap(), vec!["a:x", "b:x"]);
    }

    #[test]
    fn removed_handlers_stop_firing() {
        let calls = Calls::default();
        let registry = ObserverRegistry::<str>::new();
        let a = recording(&calls, "a");
        let b = recording(&calls, "b");
        let c = recording(&calls, "c");
        registry.add(&a).add(&b).add(&c);

        registry.remove(&b);
        registry.dispatch("x");

        assert!(!registry.contains(&b));
        assert_eq!(*calls.lock().unwrap(), vec!["a:x", "c:x"]);
    }

    #[test]
    fn removing_unknown_handler_is_a_no_op() {
        let calls = Calls::default();
        let registry = ObserverRegistry::<str>::new();
        registry.add(&recording(&calls, "a"));

        registry.remove(&recording(&calls, "stranger"));

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn equal_closures_in_different_arcs_are_distinct() {
        let calls = Calls::default();
        let registry = ObserverRegistry::<str>::new();
        registry.add(&recording(&calls, "a")).add(&recording(&calls, "a"));

        registry.dispatch("x");

        assert_eq!(*calls.lock().unwrap(), vec!["a:x", "a:x"]);
    }

    #[test]
    fn panicking_handler_does_not_stop_dispatch() {
        let calls = Calls::default();
        let registry = ObserverRegistry::<str>::new();
        let boom: Arc<dyn Fn(&str) + Send + Sync> = Arc::new(|_: &str| panic!("boom"));
        registry.add(&boom).add(&recording(&calls, "after"));

        registry.dispatch("x");
        registry.dispatch("y");

        assert_eq!(*calls.lock().unwrap(), vec!["after:x", "after:y"]);
    }

    #[test]
    fn handler_may_edit_its_own_registry() {
        let calls = Calls::default();
        let registry = Arc::new(ObserverRegistry::<str>::new());
        let late = recording(&calls, "late");
        let adder: Arc<dyn Fn(&str) + Send + Sync> = {
            let registry = Arc::clone(&registry);
            let late = Arc::clone(&late);
            Arc::new(move |_: &str| {
                registry.add(&late);
            })
        };
        registry.add(&adder);

        registry.dispatch("x");
        registry.dispatch("y");

        assert_eq!(registry.len(), 2);
        assert_eq!(*calls.lock().unwrap(), vec!["late:y"]);
    }

    #[test]
    fn panicking_handler_is_reported() {
        let registry = ObserverRegistry::<str>::new();
        let boom: Arc<dyn Fn(&str) + Send + Sync> =
            Arc::new(|_: &str| panic!("registry test kaboom"));
        registry.add(&boom);

        registry.dispatch("x");

        assert!(internal::reported(
            Level::Warn,
            "observer #0 panicked: registry test kaboom"
        ));
    }

    #[test]
    fn error_observers_receive_the_error() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let registry = ErrorObservers::new();
        registry.add(&observer(move |err| sink.lock().unwrap().push(err.to_string())));

        let err = std::io::Error::other("disk on fire");
        registry.dispatch(&err);

        assert_eq!(*seen.lock().unwrap(), vec!["disk on fire"]);
    }
}
