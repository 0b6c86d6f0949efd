//! Adapter utilities for the `snapsheet` crate.
//!
//! The `snapsheet` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A retargetable spring that follows the engine's snap requests
//! - A controller that ties drag events, springs and open/close lifecycle hooks together
//! - An imperative handle exposing `snap_to` to hosts that only hold a reference
//!
//! This crate is intentionally framework-agnostic (no egui/iced/DOM bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod handle;
mod spring;


pub use controller::{Controller, MeasureContent};
pub use handle::SheetHandle;
pub use spring::Spring;
