use alloc::rc::Rc;
use core::cell::RefCell;

use crate::Controller;

/// A cloneable handle to a [`Controller`] for hosts that only keep a reference to the sheet.
///
/// Calls made while the controller is already borrowed (e.g. from inside an `on_snap` callback)
/// are dropped instead of panicking.
#[derive(Clone, Debug)]
pub struct SheetHandle {
    inner: Rc<RefCell<Controller>>,
}

impl SheetHandle {
    pub fn new(controller: Controller) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    /// Snaps to the snap point at `index`.
    ///
    /// Out-of-range indexes, missing snap points and unmeasured content are no-ops.
    pub fn snap_to(&self, index: usize, now_ms: u64) {
        if let Ok(mut c) = self.inner.try_borrow_mut() {
            c.snap_to(index, now_ms);
        }
    }

    /// Advances the wrapped controller (see [`Controller::tick`]).
    pub fn tick(&self, now_ms: u64) -> Option<f32> {
        self.inner.try_borrow_mut().ok()?.tick(now_ms)
    }

    /// Runs `f` with mutable access to the controller.
    ///
    /// Returns `None` if the controller is already borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        let mut c = self.inner.try_borrow_mut().ok()?;
        Some(f(&mut c))
    }

    pub fn offset(&self) -> Option<f32> {
        self.inner.try_borrow().ok().map(|c| c.offset())
    }
}
