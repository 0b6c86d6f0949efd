use alloc::sync::Arc;
use core::fmt;

use snapsheet::{DragSession, ReleaseOutcome, Sheet, SheetOptions, SnapRequest, SpringConfig};

use crate::Spring;

/// Measures the rendered content height on demand. `None` while the panel is not laid out.
pub type MeasureContent = Arc<dyn Fn() -> Option<f32> + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Opening,
    Closing,
}

/// A framework-neutral controller that wraps a `snapsheet::Sheet` and a [`Spring`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_height` / `on_drag_*` when UI events occur
/// - `set_open` / `set_options` on every render pass
/// - `tick(now_ms)` each frame, applying the returned offset to the panel
///
/// It also plays the part of the content collaborator: `on_open_start`/`on_close_start` fire when
/// an open/close transition begins and `on_open_end`/`on_close_end` once the spring settles.
pub struct Controller {
    sheet: Sheet,
    spring: Option<Spring>,
    drag: Option<DragSession>,
    measure: Option<MeasureContent>,
    phase: Option<Phase>,
}

impl Controller {
    pub fn new(options: SheetOptions, viewport_height: f32) -> Self {
        Self::from_sheet(Sheet::new(options, viewport_height))
    }

    pub fn from_sheet(sheet: Sheet) -> Self {
        Self {
            sheet,
            spring: None,
            drag: None,
            measure: None,
            phase: None,
        }
    }

    pub fn with_measure(mut self, measure: impl Fn() -> Option<f32> + Send + Sync + 'static) -> Self {
        self.measure = Some(Arc::new(measure));
        self
    }

    pub fn set_measure(&mut self, measure: Option<MeasureContent>) {
        self.measure = measure;
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut Sheet {
        &mut self.sheet
    }

    pub fn into_sheet(self) -> Sheet {
        self.sheet
    }

    pub fn offset(&self) -> f32 {
        self.sheet.offset()
    }

    pub fn is_animating(&self) -> bool {
        self.spring.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn spring(&self) -> Option<&Spring> {
        self.spring.as_ref()
    }

    fn content_height(&self) -> Option<f32> {
        self.measure.as_ref().and_then(|m| m())
    }

    /// Mounts the sheet. A sheet created open starts animating toward its open target here.
    pub fn mount(&mut self, now_ms: u64) {
        if self.sheet.mount() && self.sheet.is_open() {
            self.begin_open_change(true, now_ms);
        }
    }

    pub fn on_viewport_height(&mut self, viewport_height: f32) {
        self.sheet.set_viewport_height(viewport_height);
    }

    /// Applies the options of a new render pass, animating if `is_open` changed.
    pub fn set_options(&mut self, options: SheetOptions, now_ms: u64) {
        let was_open = self.sheet.is_open();
        self.sheet.set_options(options);
        let is_open = self.sheet.is_open();
        if is_open != was_open {
            self.begin_open_change(is_open, now_ms);
        }
    }

    /// Opens or closes the sheet programmatically.
    ///
    /// Opening animates to `initial_snap` (or fully open without snap points), closing animates to
    /// the closed offset. Nothing happens if the state does not change.
    pub fn set_open(&mut self, is_open: bool, now_ms: u64) {
        if self.sheet.is_open() == is_open {
            return;
        }
        self.sheet.set_open(is_open);
        self.begin_open_change(is_open, now_ms);
    }

    fn begin_open_change(&mut self, is_open: bool, now_ms: u64) {
        // A host-driven change ends any gesture in progress.
        if let Some(session) = self.drag.take() {
            self.sheet.drag_end(session, 0.0, None);
        }
        let content_height = self.content_height();
        let callbacks = self.sheet.callbacks().clone();
        let target = if is_open {
            callbacks.fire_open_start();
            self.phase = Some(Phase::Opening);
            self.sheet.open_target(content_height)
        } else {
            callbacks.fire_close_start();
            self.phase = Some(Phase::Closing);
            Some(self.sheet.closed_offset(content_height))
        };
        match target {
            Some(target) => {
                let spring = self.sheet.options().spring;
                self.animate_to(target, spring, None, now_ms);
            }
            None => self.finish_phase(),
        }
    }

    fn finish_phase(&mut self) {
        match self.phase.take() {
            Some(Phase::Opening) => self.sheet.callbacks().fire_open_end(),
            Some(Phase::Closing) => self.sheet.callbacks().fire_close_end(),
            None => {}
        }
    }

    /// Starts a drag gesture, taking the offset away from the spring.
    ///
    /// An open/close transition cut short by the gesture ends here, so its end hook fires now
    /// rather than when a later snap settles. Returns `false` when dragging is disabled.
    pub fn on_drag_start(&mut self) -> bool {
        let Some(session) = self.sheet.drag_start() else {
            return false;
        };
        self.spring = None;
        self.finish_phase();
        self.drag = Some(session);
        true
    }

    /// Applies one drag tick. Returns `false` when no gesture is active.
    pub fn on_drag(&mut self, delta_y: f32, velocity_y: f32) -> bool {
        match &self.drag {
            Some(session) => self.sheet.drag_update(session, delta_y, velocity_y),
            None => false,
        }
    }

    /// Ends the active gesture and starts the resolved transition, seeded with the release
    /// velocity.
    pub fn on_drag_end(&mut self, velocity_y: f32, now_ms: u64) -> ReleaseOutcome {
        let Some(session) = self.drag.take() else {
            return ReleaseOutcome::Skipped;
        };
        let content_height = self.content_height();
        let outcome = self.sheet.drag_end(session, velocity_y, content_height);
        if let ReleaseOutcome::Snap(req) = outcome {
            self.follow(req, Some(velocity_y), now_ms);
        }
        outcome
    }

    /// Snaps to a configured snap point (see `Sheet::snap_to`).
    ///
    /// Returns the target offset, or `None` if the call was a no-op.
    pub fn snap_to(&mut self, index: usize, now_ms: u64) -> Option<f32> {
        let content_height = self.content_height();
        let req = self.sheet.snap_to(index, content_height)?;
        self.drag = None;
        self.follow(req, None, now_ms);
        Some(req.target)
    }

    fn follow(&mut self, req: SnapRequest, velocity: Option<f32>, now_ms: u64) {
        self.animate_to(req.target, req.spring, velocity, now_ms);
    }

    fn animate_to(&mut self, target: f32, config: SpringConfig, velocity: Option<f32>, now_ms: u64) {
        if let Some(spring) = self.spring.as_mut() {
            spring.config = config;
            spring.retarget(now_ms, target);
            return;
        }
        let mut spring = Spring::new(self.sheet.offset(), target, now_ms, config);
        if let Some(v) = velocity {
            spring = spring.with_velocity(v);
        }
        self.spring = Some(spring);
    }

    /// Advances the controller.
    ///
    /// If a spring is active, writes its next frame into the sheet and returns the new offset.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let spring = self.spring.as_mut()?;
        let offset = spring.advance(now_ms);
        let settled = spring.is_settled();
        self.sheet.apply_animation_frame(offset);

        if settled {
            self.spring = None;
            self.finish_phase();
        }
        Some(offset)
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("sheet", &self.sheet)
            .field("spring", &self.spring)
            .field("drag", &self.drag)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
