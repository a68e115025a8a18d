//! The embedding environment: element geometry, pointer listeners, resize observation.
//!
//! [`EventHost`] is the seam a browser binding would implement. [`MemoryHost`] is a complete
//! in-memory implementation used by tests, the replay session and the CLI.

use crate::foundation::core::{ElementId, Point, Rect, TimestampMs};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Pointer event kinds the grid listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    PointerMove,
    PointerDown,
    PointerUp,
    PointerLeave,
    PointerCancel,
}

impl EventKind {
    pub const POINTER: [EventKind; 5] = [
        EventKind::PointerMove,
        EventKind::PointerDown,
        EventKind::PointerUp,
        EventKind::PointerLeave,
        EventKind::PointerCancel,
    ];
}

/// A pointer event as delivered by the host, in client (viewport) CSS coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostEvent {
    pub kind: EventKind,
    pub client: Point,
    pub time: TimestampMs,
}

impl HostEvent {
    pub fn new(kind: EventKind, client: Point, time: TimestampMs) -> Self {
        Self { kind, client, time }
    }
}

pub type Listener = Rc<dyn Fn(&HostEvent)>;

/// Called with the observed element and its new client rect.
pub type ResizeCallback = Rc<dyn Fn(ElementId, Rect)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

pub trait EventHost {
    fn add_listener(&self, element: ElementId, kind: EventKind, listener: Listener) -> ListenerId;

    /// Removing an unknown listener is a no-op.
    fn remove_listener(&self, id: ListenerId);

    fn create_resize_observer(&self, callback: ResizeCallback) -> ObserverId;

    /// Start observing `element`. Returns `false` when the element does not exist. Observing
    /// an element twice with the same observer is a no-op.
    fn observe(&self, observer: ObserverId, element: ElementId) -> bool;

    /// Stop all observation and release the observer.
    fn disconnect(&self, observer: ObserverId);

    /// Client rect of `element` in CSS pixels.
    fn element_rect(&self, element: ElementId) -> Option<Rect>;

    fn device_pixel_ratio(&self) -> f64;
}

struct ObserverEntry {
    callback: ResizeCallback,
    targets: BTreeSet<ElementId>,
}

struct HostState {
    next_element: u32,
    next_id: u64,
    elements: BTreeMap<ElementId, Rect>,
    listeners: BTreeMap<u64, (ElementId, EventKind, Listener)>,
    observers: BTreeMap<u64, ObserverEntry>,
    device_pixel_ratio: f64,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            next_element: 0,
            next_id: 0,
            elements: BTreeMap::new(),
            listeners: BTreeMap::new(),
            observers: BTreeMap::new(),
            device_pixel_ratio: 1.0,
        }
    }
}

impl HostState {
    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory [`EventHost`]. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Rc<RefCell<HostState>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_element(&self, rect: Rect) -> ElementId {
        let mut st = self.state.borrow_mut();
        let id = ElementId(st.next_element);
        st.next_element += 1;
        st.elements.insert(id, rect);
        id
    }

    /// Remove an element. Listeners attached to it stay registered, like in the DOM.
    pub fn remove_element(&self, element: ElementId) {
        let mut st = self.state.borrow_mut();
        st.elements.remove(&element);
        for obs in st.observers.values_mut() {
            obs.targets.remove(&element);
        }
    }

    /// Move/resize an element and notify every observer watching it.
    pub fn set_element_rect(&self, element: ElementId, rect: Rect) {
        let callbacks: Vec<ResizeCallback> = {
            let mut st = self.state.borrow_mut();
            let Some(slot) = st.elements.get_mut(&element) else {
                return;
            };
            *slot = rect;
            st.observers
                .values()
                .filter(|o| o.targets.contains(&element))
                .map(|o| o.callback.clone())
                .collect()
        };
        for cb in callbacks {
            cb(element, rect);
        }
    }

    /// Takes effect on the next resize notification, as in browsers.
    pub fn set_device_pixel_ratio(&self, ratio: f64) {
        self.state.borrow_mut().device_pixel_ratio = ratio;
    }

    /// Deliver `event` to every listener of its kind on `element`. Returns the number of
    /// listeners invoked.
    pub fn dispatch(&self, element: ElementId, event: HostEvent) -> usize {
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .listeners
            .values()
            .filter(|(el, kind, _)| *el == element && *kind == event.kind)
            .map(|(_, _, l)| l.clone())
            .collect();
        for l in &listeners {
            l(&event);
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn listeners_on(&self, element: ElementId) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|(el, _, _)| *el == element)
            .count()
    }

    /// Live (not disconnected) resize observers.
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    pub fn observed_targets(&self, observer: ObserverId) -> usize {
        self.state
            .borrow()
            .observers
            .get(&observer.0)
            .map_or(0, |o| o.targets.len())
    }
}

impl EventHost for MemoryHost {
    fn add_listener(&self, element: ElementId, kind: EventKind, listener: Listener) -> ListenerId {
        let mut st = self.state.borrow_mut();
        let id = st.fresh_id();
        st.listeners.insert(id, (element, kind, listener));
        ListenerId(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.state.borrow_mut().listeners.remove(&id.0);
    }

    fn create_resize_observer(&self, callback: ResizeCallback) -> ObserverId {
        let mut st = self.state.borrow_mut();
        let id = st.fresh_id();
        st.observers.insert(
            id,
            ObserverEntry {
                callback,
                targets: BTreeSet::new(),
            },
        );
        ObserverId(id)
    }

    fn observe(&self, observer: ObserverId, element: ElementId) -> bool {
        let mut st = self.state.borrow_mut();
        if !st.elements.contains_key(&element) {
            return false;
        }
        match st.observers.get_mut(&observer.0) {
            Some(o) => {
                o.targets.insert(element);
                true
            }
            None => false,
        }
    }

    fn disconnect(&self, observer: ObserverId) {
        self.state.borrow_mut().observers.remove(&observer.0);
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.state.borrow().elements.get(&element).copied()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.state.borrow().device_pixel_ratio
    }
}

#[cfg(test)]
#[path = "../tests/unit/host.rs"]
mod tests;
