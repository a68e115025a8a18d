use crate::foundation::error::DotfieldResult;
use crate::grid::DrawList;
use std::cell::RefCell;
use std::rc::Rc;

/// Consumer of composed frames (the canvas in a browser binding).
pub trait DrawTarget {
    fn present(&mut self, list: &DrawList) -> DotfieldResult<()>;
}

#[derive(Debug, Default)]
struct Recording {
    last: Option<DrawList>,
    presents: u64,
}

/// Records draw lists instead of rasterizing them. Clones share the recording.
#[derive(Clone, Debug, Default)]
pub struct RecordingTarget {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently presented list.
    pub fn last(&self) -> Option<DrawList> {
        self.inner.borrow().last.clone()
    }

    pub fn presents(&self) -> u64 {
        self.inner.borrow().presents
    }
}

impl DrawTarget for RecordingTarget {
    fn present(&mut self, list: &DrawList) -> DotfieldResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.last = Some(list.clone());
        inner.presents += 1;
        Ok(())
    }
}
