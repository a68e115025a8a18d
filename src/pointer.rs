//! Injectable pointer-tracking service keyed by owning element.

use crate::foundation::core::{ElementId, Point, TimestampMs};
use crate::host::{EventHost, EventKind, HostEvent, Listener, ListenerId};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// A pointer event in element-local CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalPointerEvent {
    pub kind: EventKind,
    pub position: Point,
    pub time: TimestampMs,
}

/// Receiver of an element's pointer events.
pub trait PointerSink {
    fn on_pointer(&self, event: LocalPointerEvent);
}

/// Proof of one [`PointerTracker::register`] call. Goes stale once the element is registered
/// again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    pub element: ElementId,
    generation: u64,
}

struct Entry {
    generation: u64,
    listeners: Vec<ListenerId>,
}

/// Attaches and detaches pointer listeners on behalf of owning elements.
///
/// Each element has at most one registration; clones share the registry.
#[derive(Clone)]
pub struct PointerTracker {
    host: Rc<dyn EventHost>,
    registrations: Rc<RefCell<BTreeMap<ElementId, Entry>>>,
    next_generation: Rc<Cell<u64>>,
}

impl PointerTracker {
    pub fn new(host: Rc<dyn EventHost>) -> Self {
        Self {
            host,
            registrations: Rc::new(RefCell::new(BTreeMap::new())),
            next_generation: Rc::new(Cell::new(0)),
        }
    }

    /// Route pointer events on `element` to `sink`, replacing any previous registration.
    ///
    /// The tracker holds the sink weakly; once the sink is dropped its events are discarded.
    pub fn register(&self, element: ElementId, sink: Weak<dyn PointerSink>) -> Registration {
        if let Some(old) = self.registrations.borrow_mut().remove(&element) {
            self.detach(old.listeners);
        }

        let host = Rc::downgrade(&self.host);
        let listeners = EventKind::POINTER
            .iter()
            .map(|&kind| {
                let host = host.clone();
                let sink = sink.clone();
                let listener: Listener = Rc::new(move |ev: &HostEvent| {
                    let (Some(host), Some(sink)) = (host.upgrade(), sink.upgrade()) else {
                        return;
                    };
                    let origin = host
                        .element_rect(element)
                        .map_or(Point::ZERO, |r| r.origin());
                    sink.on_pointer(LocalPointerEvent {
                        kind: ev.kind,
                        position: Point::new(ev.client.x - origin.x, ev.client.y - origin.y),
                        time: ev.time,
                    });
                });
                self.host.add_listener(element, kind, listener)
            })
            .collect();

        let generation = self.next_generation.get();
        self.next_generation.set(generation + 1);
        self.registrations.borrow_mut().insert(
            element,
            Entry {
                generation,
                listeners,
            },
        );
        tracing::trace!(element = element.0, generation, "pointer tracking registered");
        Registration {
            element,
            generation,
        }
    }

    /// Detach the listeners of `registration`. Returns `false` if it was already removed or has
    /// been replaced by a later registration, in which case nothing is touched.
    pub fn unregister(&self, registration: Registration) -> bool {
        let entry = {
            let mut map = self.registrations.borrow_mut();
            let current = map
                .get(&registration.element)
                .is_some_and(|e| e.generation == registration.generation);
            if current {
                map.remove(&registration.element)
            } else {
                None
            }
        };
        let Some(entry) = entry else {
            tracing::trace!(
                element = registration.element.0,
                "stale pointer registration, nothing to detach"
            );
            return false;
        };
        self.detach(entry.listeners);
        tracing::trace!(
            element = registration.element.0,
            "pointer tracking unregistered"
        );
        true
    }

    fn detach(&self, listeners: Vec<ListenerId>) {
        for id in listeners {
            self.host.remove_listener(id);
        }
    }

    pub fn is_registered(&self, element: ElementId) -> bool {
        self.registrations.borrow().contains_key(&element)
    }

    /// Number of tracked elements.
    pub fn registered(&self) -> usize {
        self.registrations.borrow().len()
    }
}

#[cfg(test)]
#[path = "../tests/unit/pointer.rs"]
mod tests;
