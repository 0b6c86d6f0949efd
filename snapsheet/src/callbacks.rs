use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use crate::{SheetCallback, SheetOptions};

/// The open/close lifecycle hooks, as last supplied by the host.
#[derive(Clone, Default)]
pub struct LifecycleCallbacks {
    pub on_open_start: Option<SheetCallback>,
    pub on_open_end: Option<SheetCallback>,
    pub on_close_start: Option<SheetCallback>,
    pub on_close_end: Option<SheetCallback>,
}

impl LifecycleCallbacks {
    pub fn from_options(options: &SheetOptions) -> Self {
        Self {
            on_open_start: options.on_open_start.clone(),
            on_open_end: options.on_open_end.clone(),
            on_close_start: options.on_close_start.clone(),
            on_close_end: options.on_close_end.clone(),
        }
    }
}

impl fmt::Debug for LifecycleCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleCallbacks")
            .field("on_open_start", &self.on_open_start.is_some())
            .field("on_open_end", &self.on_open_end.is_some())
            .field("on_close_start", &self.on_close_start.is_some())
            .field("on_close_end", &self.on_close_end.is_some())
            .finish()
    }
}

/// A shared cell holding the current [`LifecycleCallbacks`].
///
/// The cell keeps its identity for the sheet's whole lifetime; only its contents are replaced.
/// Consumers keep a clone and read the hooks when they fire, so they always see the latest ones.
#[derive(Clone, Default)]
pub struct CallbackCell(Rc<RefCell<LifecycleCallbacks>>);

impl CallbackCell {
    pub fn new(callbacks: LifecycleCallbacks) -> Self {
        Self(Rc::new(RefCell::new(callbacks)))
    }

    pub(crate) fn replace(&self, callbacks: LifecycleCallbacks) {
        *self.0.borrow_mut() = callbacks;
    }

    pub fn get(&self) -> LifecycleCallbacks {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn fire(&self, pick: impl FnOnce(&LifecycleCallbacks) -> Option<SheetCallback>) {
        // Release the borrow before calling out; hooks may re-enter the sheet.
        let cb = pick(&self.0.borrow());
        if let Some(cb) = cb {
            cb();
        }
    }

    pub fn fire_open_start(&self) {
        self.fire(|c| c.on_open_start.clone());
    }

    pub fn fire_open_end(&self) {
        self.fire(|c| c.on_open_end.clone());
    }

    pub fn fire_close_start(&self) {
        self.fire(|c| c.on_close_start.clone());
    }

    pub fn fire_close_end(&self) {
        self.fire(|c| c.on_close_end.clone());
    }
}

impl fmt::Debug for CallbackCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallbackCell").field(&self.0.borrow()).finish()
    }
}
