use super::*;
use std::cell::Cell;

#[test]
fn dispatch_reaches_matching_listeners_only() {
    let host = MemoryHost::new();
    let a = host.create_element(Rect::new(0.0, 0.0, 10.0, 10.0));
    let b = host.create_element(Rect::new(0.0, 0.0, 10.0, 10.0));

    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let id = host.add_listener(
        a,
        EventKind::PointerMove,
        Rc::new(move |_: &HostEvent| h.set(h.get() + 1)),
    );

    let ev = HostEvent::new(EventKind::PointerMove, Point::new(1.0, 1.0), 0.0);
    assert_eq!(host.dispatch(a, ev), 1);
    assert_eq!(host.dispatch(b, ev), 0);
    let down = HostEvent::new(EventKind::PointerDown, Point::new(1.0, 1.0), 0.0);
    assert_eq!(host.dispatch(a, down), 0);
    assert_eq!(hits.get(), 1);

    host.remove_listener(id);
    host.remove_listener(id);
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.dispatch(a, ev), 0);
}

#[test]
fn listeners_may_touch_the_host_while_dispatching() {
    let host = MemoryHost::new();
    let el = host.create_element(Rect::new(0.0, 0.0, 10.0, 10.0));
    let slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

    let h = host.clone();
    let s = slot.clone();
    let id = host.add_listener(
        el,
        EventKind::PointerLeave,
        Rc::new(move |_: &HostEvent| {
            if let Some(id) = s.get() {
                h.remove_listener(id);
            }
        }),
    );
    slot.set(Some(id));

    host.dispatch(
        el,
        HostEvent::new(EventKind::PointerLeave, Point::ZERO, 0.0),
    );
    assert_eq!(host.listener_count(), 0);
}

#[test]
fn observe_is_idempotent_and_notifies_on_resize() {
    let host = MemoryHost::new();
    let el = host.create_element(Rect::new(0.0, 0.0, 10.0, 10.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let obs = host.create_resize_observer(Rc::new(move |e: ElementId, r: Rect| {
        s.borrow_mut().push((e, r))
    }));

    assert!(host.observe(obs, el));
    assert!(host.observe(obs, el));
    assert_eq!(host.observed_targets(obs), 1);

    let r = Rect::new(0.0, 0.0, 40.0, 20.0);
    host.set_element_rect(el, r);
    assert_eq!(*seen.borrow(), vec![(el, r)]);
    assert_eq!(host.element_rect(el), Some(r));

    host.disconnect(obs);
    assert_eq!(host.observer_count(), 0);
    host.set_element_rect(el, Rect::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn observing_missing_element_fails_softly() {
    let host = MemoryHost::new();
    let obs = host.create_resize_observer(Rc::new(|_: ElementId, _: Rect| {}));
    assert!(!host.observe(obs, ElementId(42)));
    assert_eq!(host.observed_targets(obs), 0);
    assert_eq!(host.element_rect(ElementId(42)), None);
}

#[test]
fn device_pixel_ratio_defaults_to_one() {
    let host = MemoryHost::new();
    assert_eq!(host.device_pixel_ratio(), 1.0);
    host.set_device_pixel_ratio(2.0);
    assert_eq!(host.device_pixel_ratio(), 2.0);
}
