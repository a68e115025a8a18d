use super::*;
use crate::foundation::core::Rect;
use crate::host::MemoryHost;

#[derive(Default)]
struct Collect(RefCell<Vec<LocalPointerEvent>>);

impl PointerSink for Collect {
    fn on_pointer(&self, event: LocalPointerEvent) {
        self.0.borrow_mut().push(event);
    }
}

fn setup() -> (MemoryHost, PointerTracker, ElementId) {
    let host = MemoryHost::new();
    let el = host.create_element(Rect::new(100.0, 50.0, 300.0, 250.0));
    let tracker = PointerTracker::new(Rc::new(host.clone()));
    (host, tracker, el)
}

#[test]
fn events_arrive_in_element_local_coordinates() {
    let (host, tracker, el) = setup();
    let sink = Rc::new(Collect::default());
    let weak: Weak<dyn PointerSink> = Rc::downgrade(&sink) as Weak<dyn PointerSink>;
    tracker.register(el, weak);
    assert_eq!(host.listeners_on(el), EventKind::POINTER.len());

    host.dispatch(
        el,
        HostEvent::new(EventKind::PointerMove, Point::new(110.0, 70.0), 5.0),
    );
    let got = sink.0.borrow();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].position, Point::new(10.0, 20.0));
    assert_eq!(got[0].time, 5.0);
    assert_eq!(got[0].kind, EventKind::PointerMove);
}

#[test]
fn re_registering_replaces_listeners() {
    let (host, tracker, el) = setup();
    let first = Rc::new(Collect::default());
    let second = Rc::new(Collect::default());
    tracker.register(el, Rc::downgrade(&first) as Weak<dyn PointerSink>);
    tracker.register(el, Rc::downgrade(&second) as Weak<dyn PointerSink>);

    assert_eq!(tracker.registered(), 1);
    assert_eq!(host.listener_count(), EventKind::POINTER.len());

    host.dispatch(el, HostEvent::new(EventKind::PointerLeave, Point::ZERO, 0.0));
    assert!(first.0.borrow().is_empty());
    assert_eq!(second.0.borrow().len(), 1);
}

#[test]
fn unregister_detaches_everything() {
    let (host, tracker, el) = setup();
    let sink = Rc::new(Collect::default());
    let reg = tracker.register(el, Rc::downgrade(&sink) as Weak<dyn PointerSink>);
    assert!(tracker.is_registered(el));
    assert!(tracker.unregister(reg));
    assert!(!tracker.unregister(reg));
    assert_eq!(host.listener_count(), 0);
    assert_eq!(tracker.registered(), 0);
}

#[test]
fn dropped_sink_is_ignored() {
    let (host, tracker, el) = setup();
    let sink = Rc::new(Collect::default());
    tracker.register(el, Rc::downgrade(&sink) as Weak<dyn PointerSink>);
    drop(sink);
    assert_eq!(
        host.dispatch(el, HostEvent::new(EventKind::PointerMove, Point::ZERO, 0.0)),
        1
    );
}

#[test]
fn replaced_registration_cannot_detach_its_successor() {
    let (host, tracker, el) = setup();
    let first = Rc::new(Collect::default());
    let second = Rc::new(Collect::default());
    let old = tracker.register(el, Rc::downgrade(&first) as Weak<dyn PointerSink>);
    let new = tracker.register(el, Rc::downgrade(&second) as Weak<dyn PointerSink>);
    assert_ne!(old, new);

    assert!(!tracker.unregister(old));
    assert!(tracker.is_registered(el));
    assert_eq!(host.listeners_on(el), EventKind::POINTER.len());

    host.dispatch(el, HostEvent::new(EventKind::PointerMove, Point::ZERO, 0.0));
    assert_eq!(second.0.borrow().len(), 1);

    assert!(tracker.unregister(new));
    assert_eq!(host.listener_count(), 0);
}
