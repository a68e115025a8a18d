//! Animation-frame scheduling behind a trait, so frames can be driven deterministically.

use crate::foundation::core::TimestampMs;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Callback run once on the next frame with the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(TimestampMs)>;

/// Handle returned by [`FrameScheduler::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CancelToken(u64);

/// `requestAnimationFrame` / `cancelAnimationFrame` contract.
pub trait FrameScheduler {
    /// Run `callback` once on the next frame.
    fn schedule(&self, callback: FrameCallback) -> CancelToken;
    /// Drop a pending callback. Unknown or already-run tokens are ignored.
    fn cancel(&self, token: CancelToken);
    /// Number of callbacks waiting for a frame.
    fn pending(&self) -> usize;
}

#[derive(Default)]
struct ManualQueue {
    next_token: u64,
    queue: BTreeMap<u64, FrameCallback>,
    frames_run: u64,
}

/// Scheduler whose frames only advance when [`ManualScheduler::run_frame`] is called.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback that was pending when this call started, in scheduling order.
    ///
    /// Callbacks scheduled while the frame runs wait for the next frame.
    pub fn run_frame(&self, now: TimestampMs) -> usize {
        let due = {
            let mut inner = self.inner.borrow_mut();
            inner.frames_run += 1;
            std::mem::take(&mut inner.queue)
        };
        let n = due.len();
        for (_, cb) in due {
            cb(now);
        }
        n
    }

    pub fn frames_run(&self) -> u64 {
        self.inner.borrow().frames_run
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&self, callback: FrameCallback) -> CancelToken {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_token;
        inner.next_token += 1;
        inner.queue.insert(id, callback);
        CancelToken(id)
    }

    fn cancel(&self, token: CancelToken) {
        self.inner.borrow_mut().queue.remove(&token.0);
    }

    fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }
}

#[cfg(test)]
#[path = "../tests/unit/scheduler.rs"]
mod tests;
