//! The mounted dot-grid: wires host events, resize observation and the decay frame loop to the
//! pointer state and the pure composer.

use crate::config::DotGridConfig;
use crate::foundation::core::{ElementId, Point, Rect, TimestampMs};
use crate::foundation::error::DotfieldResult;
use crate::grid::compose_frame;
use crate::host::{EventHost, EventKind, ObserverId, ResizeCallback};
use crate::pointer::{LocalPointerEvent, PointerSink, PointerTracker, Registration};
use crate::render::target::DrawTarget;
use crate::scheduler::{CancelToken, FrameScheduler};
use crate::surface::SurfaceSize;
use crate::trail::{PointerInput, PointerState};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Services a grid needs from its environment. Cloning is cheap.
#[derive(Clone)]
pub struct DotGridEnv {
    pub host: Rc<dyn EventHost>,
    pub scheduler: Rc<dyn FrameScheduler>,
    pub tracker: PointerTracker,
}

impl DotGridEnv {
    /// Build an environment whose tracker attaches listeners on `host`.
    pub fn new(host: Rc<dyn EventHost>, scheduler: Rc<dyn FrameScheduler>) -> Self {
        let tracker = PointerTracker::new(host.clone());
        Self {
            host,
            scheduler,
            tracker,
        }
    }
}

struct GridState {
    config: DotGridConfig,
    pointer: PointerState,
    size: Option<SurfaceSize>,
    target: Box<dyn DrawTarget>,
    pending_frame: Option<CancelToken>,
    draws: u64,
    mounted: bool,
}

struct Shared {
    element: ElementId,
    host: Rc<dyn EventHost>,
    scheduler: Rc<dyn FrameScheduler>,
    state: RefCell<GridState>,
}

impl Shared {
    fn resize(&self, rect: Option<Rect>) {
        let ratio = self.host.device_pixel_ratio();
        let size = rect.map(|r| SurfaceSize::from_display(r.width(), r.height(), ratio));
        tracing::debug!(
            element = self.element.0,
            width = size.map(|s| s.width),
            height = size.map(|s| s.height),
            "surface resized"
        );
        self.state.borrow_mut().size = size;
        self.redraw();
    }

    fn redraw(&self) {
        let mut st = self.state.borrow_mut();
        let st = &mut *st;
        if !st.mounted {
            return;
        }
        let Some(size) = st.size.filter(|s| !s.is_empty()) else {
            tracing::trace!(element = self.element.0, "draw skipped: surface has no size");
            return;
        };
        let list = compose_frame(
            size,
            &st.config,
            st.pointer.draw_pointer(),
            st.pointer.trail(),
        );
        if let Err(e) = st.target.present(&list) {
            tracing::warn!(element = self.element.0, "present failed: {e}");
            return;
        }
        st.draws += 1;
    }

    fn on_frame(self: &Rc<Self>, now: TimestampMs) {
        let popped = {
            let mut st = self.state.borrow_mut();
            st.pending_frame = None;
            if !st.mounted {
                return;
            }
            st.pointer.decay(now)
        };
        if popped {
            tracing::trace!(element = self.element.0, now, "trail decayed");
            self.redraw();
        }
        schedule_decay(self);
    }
}

fn schedule_decay(shared: &Rc<Shared>) {
    let weak = Rc::downgrade(shared);
    let token = shared.scheduler.schedule(Box::new(move |now| {
        if let Some(shared) = weak.upgrade() {
            shared.on_frame(now);
        }
    }));
    shared.state.borrow_mut().pending_frame = Some(token);
}

impl PointerSink for Shared {
    fn on_pointer(&self, event: LocalPointerEvent) {
        {
            let mut st = self.state.borrow_mut();
            if !st.mounted {
                return;
            }
            let ratio = st
                .size
                .map_or_else(|| self.host.device_pixel_ratio(), |s| s.ratio);
            let ratio = crate::surface::normalize_ratio(ratio);
            let device = Point::new(event.position.x * ratio, event.position.y * ratio);
            let input = match event.kind {
                EventKind::PointerMove => PointerInput::Move(device),
                EventKind::PointerDown => PointerInput::Down(device),
                EventKind::PointerUp => PointerInput::Up,
                EventKind::PointerLeave => PointerInput::Leave,
                EventKind::PointerCancel => PointerInput::Cancel,
            };
            st.pointer.apply(input, event.time);
        }
        self.redraw();
    }
}

/// Entry point for mounting dot grids.
pub struct DotGrid;

impl DotGrid {
    /// Mount a grid on `element`.
    ///
    /// Validates `config`, registers pointer tracking, observes the element for resizes, draws
    /// once and starts the decay frame loop. A missing element is not an error: observation is
    /// skipped and draws are skipped until a size is known.
    pub fn mount(
        env: &DotGridEnv,
        element: ElementId,
        config: DotGridConfig,
        target: Box<dyn DrawTarget>,
    ) -> DotfieldResult<MountedDotGrid> {
        config.validate()?;

        let shared = Rc::new(Shared {
            element,
            host: env.host.clone(),
            scheduler: env.scheduler.clone(),
            state: RefCell::new(GridState {
                pointer: PointerState::new(&config),
                config,
                size: None,
                target,
                pending_frame: None,
                draws: 0,
                mounted: true,
            }),
        });

        let sink: Weak<dyn PointerSink> = Rc::downgrade(&shared) as Weak<dyn PointerSink>;
        let registration = env.tracker.register(element, sink);

        let weak = Rc::downgrade(&shared);
        let on_resize: ResizeCallback = Rc::new(move |_el: ElementId, rect: Rect| {
            if let Some(shared) = weak.upgrade() {
                shared.resize(Some(rect));
            }
        });
        let observer = env.host.create_resize_observer(on_resize);
        if !env.host.observe(observer, element) {
            tracing::debug!(element = element.0, "resize target missing, not observing");
        }

        shared.resize(env.host.element_rect(element));
        schedule_decay(&shared);
        tracing::debug!(element = element.0, "dot grid mounted");

        Ok(MountedDotGrid {
            shared,
            tracker: env.tracker.clone(),
            registration,
            observer: Some(observer),
        })
    }
}

/// A live grid. Dropping it unmounts.
pub struct MountedDotGrid {
    shared: Rc<Shared>,
    tracker: PointerTracker,
    registration: Registration,
    observer: Option<ObserverId>,
}

impl MountedDotGrid {
    pub fn element(&self) -> ElementId {
        self.shared.element
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.state.borrow().mounted
    }

    /// Cancel the pending frame, detach pointer listeners and disconnect the resize observer.
    /// Calling it again does nothing.
    pub fn unmount(&mut self) {
        let pending = {
            let mut st = self.shared.state.borrow_mut();
            if !st.mounted {
                return;
            }
            st.mounted = false;
            let rest = PointerState::new(&st.config);
            st.pointer = rest;
            st.pending_frame.take()
        };
        if let Some(token) = pending {
            self.shared.scheduler.cancel(token);
        }
        self.tracker.unregister(self.registration);
        if let Some(observer) = self.observer.take() {
            self.shared.host.disconnect(observer);
        }
        tracing::debug!(element = self.shared.element.0, "dot grid unmounted");
    }

    /// Force a redraw with the current state.
    pub fn redraw(&self) {
        self.shared.redraw();
    }

    /// Frames presented so far.
    pub fn draw_count(&self) -> u64 {
        self.shared.state.borrow().draws
    }

    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.shared.state.borrow().size
    }

    /// Snapshot of the pointer state.
    pub fn pointer(&self) -> PointerState {
        self.shared.state.borrow().pointer.clone()
    }

    pub fn config(&self) -> DotGridConfig {
        self.shared.state.borrow().config.clone()
    }
}

impl Drop for MountedDotGrid {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../tests/unit/component.rs"]
mod tests;
