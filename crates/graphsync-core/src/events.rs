//! Event subscription lifecycle
//!
//! Handlers are bound to the rendering engine by event name. Whenever the
//! binding map changes, the whole previous map is unsubscribed before any
//! handler of the next map is subscribed; individual bindings are never
//! diffed.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Payload delivered to an event handler
pub type EventPayload = Value;

/// Shared event callback
///
/// Equality is identity: two handlers are equal only when they are clones
/// of the same allocation, so `off` removes exactly what `on` added.
#[derive(Clone)]
pub struct EventHandler(Arc<dyn Fn(&EventPayload) + Send + Sync>);

impl EventHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&EventPayload) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the handler
    pub fn call(&self, payload: &EventPayload) {
        (self.0)(payload)
    }

    pub fn same_as(&self, other: &EventHandler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for EventHandler {}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Arc::as_ptr(&self.0))
    }
}

/// Event name to handler map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBindingMap(BTreeMap<String, EventHandler>);

impl EventBindingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, handler: EventHandler) -> Self {
        self.insert(name, handler);
        self
    }

    /// Bind `handler` to `name`, returning the handler it replaces
    pub fn insert(&mut self, name: impl Into<String>, handler: EventHandler) -> Option<EventHandler> {
        self.0.insert(name.into(), handler)
    }

    pub fn get(&self, name: &str) -> Option<&EventHandler> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventHandler)> {
        self.0.iter().map(|(name, handler)| (name.as_str(), handler))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Subscription surface of the rendering engine
pub trait EventTarget {
    fn on(&mut self, name: &str, handler: &EventHandler);
    fn off(&mut self, name: &str, handler: &EventHandler);
}

/// Subscribe every binding of `map`
pub fn bind<T: EventTarget + ?Sized>(target: &mut T, map: &EventBindingMap) {
    for (name, handler) in map.iter() {
        target.on(name, handler);
    }
}

/// Unsubscribe every binding of `map`
pub fn unbind<T: EventTarget + ?Sized>(target: &mut T, map: &EventBindingMap) {
    for (name, handler) in map.iter() {
        target.off(name, handler);
    }
}

/// Replace `previous` bindings with `next` on `target`
///
/// All unsubscribes finish before the first subscribe, so no event is
/// delivered to both an old and a new handler during the swap.
pub fn rebind<T: EventTarget + ?Sized>(
    target: &mut T,
    previous: &EventBindingMap,
    next: &EventBindingMap,
) {
    unbind(target, previous);
    bind(target, next);
    tracing::debug!(
        unbound = previous.len(),
        bound = next.len(),
        "event bindings replaced"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Journal(Vec<String>);

    impl EventTarget for Journal {
        fn on(&mut self, name: &str, _handler: &EventHandler) {
            self.0.push(format!("on:{name}"));
        }

        fn off(&mut self, name: &str, _handler: &EventHandler) {
            self.0.push(format!("off:{name}"));
        }
    }

    #[test]
    fn test_handler_equality_is_identity() {
        let a = EventHandler::new(|_| {});
        let b = EventHandler::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_handler_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let handler = EventHandler::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handler.call(&Value::Null);
        handler.call(&Value::Null);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_rebind_unsubscribes_all_before_subscribing() {
        let h = EventHandler::new(|_| {});
        let previous = EventBindingMap::new()
            .with("click", h.clone())
            .with("select", h.clone());
        let next = EventBindingMap::new().with("hover", h.clone()).with("click", h);
        let mut journal = Journal::default();

        rebind(&mut journal, &previous, &next);

        let last_off = journal.0.iter().rposition(|e| e.starts_with("off:")).unwrap();
        let first_on = journal.0.iter().position(|e| e.starts_with("on:")).unwrap();
        assert!(last_off < first_on);
        assert_eq!(journal.0.len(), 4);
    }

    #[test]
    fn test_maps_compare_by_handler_identity() {
        let h = EventHandler::new(|_| {});
        let a = EventBindingMap::new().with("click", h.clone());
        let same = EventBindingMap::new().with("click", h);
        let other = EventBindingMap::new().with("click", EventHandler::new(|_| {}));
        assert_eq!(a, same);
        assert_ne!(a, other);
    }
}
