//! A headless bottom sheet engine.
//!
//! For adapter-level utilities (spring animation, controller, imperative handle), see the
//! `snapsheet-adapter` crate.
//!
//! This crate focuses on the gesture-to-position math of a draggable, snap-positioned sheet:
//! normalizing snap points against the viewport, tracking drag input, resolving a release into a
//! target offset, and mapping that target back to a snap index.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport height
//! - drag deltas, velocities and releases
//! - the measured content height when a release or snap needs it
//! - an animation primitive that follows [`SnapRequest`]s
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod callbacks;
pub mod mapper;
mod options;
mod sheet;
pub mod snap;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use callbacks::{CallbackCell, LifecycleCallbacks};
pub use options::{
    DEFAULT_CLOSE_THRESHOLD, DEFAULT_DRAG_INDICATOR_TILT, DEFAULT_FAST_DISMISS_VELOCITY,
    SheetCallback, SheetOptions, SnapCallback,
};
pub use sheet::{DragSession, Sheet, SheetContext};
pub use snap::SnapOrderViolation;
pub use state::SheetState;
pub use types::{IndexRecovery, OffsetOwner, ReleaseOutcome, RenderMode, SnapRequest, SpringConfig};
