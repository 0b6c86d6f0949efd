use alloc::vec::Vec;

use crate::mapper::{nearest_snap_target, recover_index, snap_target};
use crate::snap::{check_snap_order, normalize_snap_points};
use crate::{
    CallbackCell, LifecycleCallbacks, OffsetOwner, ReleaseOutcome, RenderMode, SheetOptions,
    SheetState, SnapOrderViolation, SnapRequest,
};

/// Proof that a drag gesture currently owns the live offset.
///
/// Sessions are only handed out while dragging is enabled, and cannot be cloned. Starting a new
/// session, or snapping imperatively, makes any older session stale.
#[derive(Debug, PartialEq, Eq)]
pub struct DragSession {
    id: u64,
}

/// A borrowed view of the state a content-rendering collaborator needs.
#[derive(Clone, Copy, Debug)]
pub struct SheetContext<'a> {
    pub offset: f32,
    pub owner: OffsetOwner,
    pub is_open: bool,
    pub initial_snap: usize,
    pub snap_points: &'a [f32],
    pub indicator_rotation: f32,
    pub callbacks: &'a CallbackCell,
    /// Whether drag handlers should be attached at all.
    pub drag_enabled: bool,
    pub viewport_height: f32,
    pub root_id: Option<&'a str>,
}

fn measured(content_height: Option<f32>) -> Option<f32> {
    content_height.filter(|h| h.is_finite() && *h > 0.0)
}

/// A headless bottom sheet engine.
///
/// This type does not hold any UI objects and never animates by itself:
/// - Your adapter reports viewport height, drag deltas and releases.
/// - Transitions are returned as [`SnapRequest`]s for an animation primitive to follow, and the
///   primitive writes frames back with [`Sheet::apply_animation_frame`].
/// - Content height is measured by the adapter and passed in where a decision needs it.
///
/// For a spring-driven controller and an imperative handle, see the `snapsheet-adapter` crate.
#[derive(Debug)]
pub struct Sheet {
    options: SheetOptions,
    viewport_height: f32,
    snap_points: Vec<f32>,
    snap_order_violation: Option<SnapOrderViolation>,

    offset: f32,
    owner: OffsetOwner,
    indicator_rotation: f32,
    session: u64,

    mounted: bool,
    is_open: bool,
    callbacks: CallbackCell,
}

impl Sheet {
    /// Creates a sheet for a viewport of the given height.
    ///
    /// The live offset starts fully closed (one viewport below the open position), since the
    /// content has not been measured yet.
    pub fn new(options: SheetOptions, viewport_height: f32) -> Self {
        sdebug!(
            snap_points = options.snap_points.len(),
            initial_snap = options.initial_snap,
            disable_drag = options.disable_drag,
            viewport_height,
            "Sheet::new"
        );
        let mut sheet = Self {
            viewport_height,
            snap_points: Vec::new(),
            snap_order_violation: None,
            offset: viewport_height,
            owner: OffsetOwner::Animation,
            indicator_rotation: 0.0,
            session: 0,
            mounted: false,
            is_open: options.is_open,
            callbacks: CallbackCell::new(LifecycleCallbacks::from_options(&options)),
            options,
        };
        sheet.normalize();
        sheet
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// Applies the options of a new render pass.
    ///
    /// The lifecycle callbacks are refreshed unconditionally, snap points are re-normalized, and a
    /// change of `is_open` is synchronized as by [`Sheet::set_open`].
    pub fn set_options(&mut self, options: SheetOptions) {
        let is_open = options.is_open;
        self.options = options;
        sdebug!(
            snap_points = self.options.snap_points.len(),
            is_open,
            "Sheet::set_options"
        );
        self.callbacks
            .replace(LifecycleCallbacks::from_options(&self.options));
        self.normalize();
        self.sync_open(is_open);
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut SheetOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn normalize(&mut self) {
        self.snap_points = normalize_snap_points(&self.options.snap_points, self.viewport_height);
        self.snap_order_violation = check_snap_order(&self.snap_points, self.viewport_height).err();
        if let Some(v) = &self.snap_order_violation {
            swarn!(
                index = v.index,
                previous = v.previous,
                current = v.current,
                "snap points should be in descending order"
            );
        }
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, viewport_height: f32) {
        if self.viewport_height == viewport_height {
            return;
        }
        self.viewport_height = viewport_height;
        self.normalize();
    }

    /// Normalized snap points (absolute visible heights, most-open first).
    pub fn snap_points(&self) -> &[f32] {
        &self.snap_points
    }

    /// The ordering problem found during the last normalization, if any.
    pub fn snap_order_violation(&self) -> Option<SnapOrderViolation> {
        self.snap_order_violation
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn owner(&self) -> OffsetOwner {
        self.owner
    }

    /// Drag indicator tilt in degrees (0 when idle).
    pub fn indicator_rotation(&self) -> f32 {
        self.indicator_rotation
    }

    pub fn callbacks(&self) -> &CallbackCell {
        &self.callbacks
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Marks the sheet as mounted. Only the first call has an effect and returns `true`.
    ///
    /// A sheet that is already open when it mounts reports `initial_snap` right away.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        sdebug!(is_open = self.is_open, "Sheet::mount");
        self.mounted = true;
        if self.is_open {
            self.report_open_state();
        }
        true
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.options.ssr {
            RenderMode::Direct
        } else if self.mounted {
            RenderMode::Portal
        } else {
            RenderMode::Placeholder
        }
    }

    /// Updates the host-controlled open state.
    ///
    /// Once mounted, every change reports a snap index when snap points and `on_snap` are both
    /// configured: `initial_snap` when opening, the last index when closing. This fires for host
    /// driven changes as well as drag driven ones.
    pub fn set_open(&mut self, is_open: bool) {
        self.options.is_open = is_open;
        self.sync_open(is_open);
    }

    fn sync_open(&mut self, is_open: bool) {
        if self.is_open == is_open {
            return;
        }
        self.is_open = is_open;
        sdebug!(is_open, mounted = self.mounted, "open state changed");
        if self.mounted {
            self.report_open_state();
        }
    }

    fn report_open_state(&self) {
        if self.snap_points.is_empty() {
            return;
        }
        if let Some(on_snap) = &self.options.on_snap {
            let index = if self.is_open {
                self.options.initial_snap
            } else {
                self.snap_points.len() - 1
            };
            on_snap(index);
        }
    }

    pub fn drag_enabled(&self) -> bool {
        !self.options.disable_drag
    }

    /// Hands the live offset to a new drag gesture.
    ///
    /// Returns `None` when dragging is disabled; no other drag entry point works without a session.
    pub fn drag_start(&mut self) -> Option<DragSession> {
        if self.options.disable_drag {
            return None;
        }
        self.session = self.session.wrapping_add(1);
        self.owner = OffsetOwner::Gesture;
        strace!(session = self.session, offset = self.offset, "drag_start");
        Some(DragSession { id: self.session })
    }

    fn owns(&self, session: &DragSession) -> bool {
        self.owner == OffsetOwner::Gesture && session.id == self.session
    }

    /// Applies one drag tick.
    ///
    /// `velocity_y` is the live offset's current rate of change; it only steers the indicator
    /// tilt. The offset never goes above the fully open position but may overshoot downward.
    ///
    /// Returns `false` if the session is stale.
    pub fn drag_update(&mut self, session: &DragSession, delta_y: f32, velocity_y: f32) -> bool {
        if !self.owns(session) {
            return false;
        }
        let tilt = self.options.drag_indicator_tilt;
        if velocity_y > 0.0 {
            self.indicator_rotation = tilt;
        } else if velocity_y < 0.0 {
            self.indicator_rotation = -tilt;
        }
        self.offset = (self.offset + delta_y).max(0.0);
        strace!(delta_y, velocity_y, offset = self.offset, "drag_update");
        true
    }

    /// Ends a drag gesture and resolves where the sheet should go.
    ///
    /// - A downward `velocity_y` above the dismiss threshold requests a close and nothing else.
    /// - Otherwise the target is the nearest snap target, or with no snap points, closed past
    ///   `close_threshold` of the content height and open below it.
    /// - Reaching `content_height` or beyond also requests a close.
    ///
    /// `content_height` is the currently measured panel height; without it no transition occurs.
    /// The indicator tilt is reset on every path.
    pub fn drag_end(
        &mut self,
        session: DragSession,
        velocity_y: f32,
        content_height: Option<f32>,
    ) -> ReleaseOutcome {
        if !self.owns(&session) {
            return ReleaseOutcome::Skipped;
        }
        self.owner = OffsetOwner::Animation;
        let outcome = self.resolve_release(velocity_y, content_height);
        self.indicator_rotation = 0.0;
        sdebug!(velocity_y, offset = self.offset, ?outcome, "drag_end");
        outcome
    }

    fn resolve_release(&mut self, velocity_y: f32, content_height: Option<f32>) -> ReleaseOutcome {
        if velocity_y > self.options.fast_dismiss_velocity {
            self.request_close();
            return ReleaseOutcome::Dismissed;
        }
        let Some(content_height) = measured(content_height) else {
            return ReleaseOutcome::Skipped;
        };

        let target = if self.snap_points.is_empty() {
            if self.offset > content_height * self.options.close_threshold {
                content_height
            } else {
                0.0
            }
        } else {
            match nearest_snap_target(&self.snap_points, content_height, self.offset) {
                Some((_, target)) => target,
                None => return ReleaseOutcome::Skipped,
            }
        };

        let index = if self.snap_points.is_empty() || self.options.on_snap.is_none() {
            None
        } else {
            let index = recover_index(
                self.options.index_recovery,
                &self.snap_points,
                content_height,
                target,
            );
            if index.is_none() {
                swarn!(
                    target,
                    content_height,
                    "no snap point matches the release target; on_snap not fired"
                );
            }
            index
        };

        ReleaseOutcome::Snap(self.finish_transition(target, index, content_height))
    }

    /// Snaps to a configured snap point without a gesture.
    ///
    /// Performs the same offset math and side effects as a release: reports `index` to
    /// `on_snap` and requests a close when the target hides the content. Out-of-range indexes,
    /// missing snap points and unmeasured content are no-ops.
    ///
    /// An active drag session is superseded: the animation owns the offset afterwards.
    pub fn snap_to(&mut self, index: usize, content_height: Option<f32>) -> Option<SnapRequest> {
        let point = *self.snap_points.get(index)?;
        let content_height = measured(content_height)?;
        if self.owner == OffsetOwner::Gesture {
            self.session = self.session.wrapping_add(1);
            self.owner = OffsetOwner::Animation;
            self.indicator_rotation = 0.0;
        }
        let target = snap_target(content_height, point);
        sdebug!(index, target, "snap_to");
        Some(self.finish_transition(target, Some(index), content_height))
    }

    fn finish_transition(
        &mut self,
        target: f32,
        index: Option<usize>,
        content_height: f32,
    ) -> SnapRequest {
        if let (Some(index), Some(on_snap)) = (index, &self.options.on_snap) {
            on_snap(index);
        }
        let closes = target >= content_height;
        if closes {
            self.request_close();
        }
        SnapRequest {
            target,
            spring: self.options.spring,
            index,
            closes,
        }
    }

    fn request_close(&self) {
        if let Some(on_close) = &self.options.on_close {
            on_close();
        }
    }

    /// Live offset that opens the sheet at `initial_snap` (or fully, without snap points).
    pub fn open_target(&self, content_height: Option<f32>) -> Option<f32> {
        if self.snap_points.is_empty() {
            return Some(0.0);
        }
        let point = *self.snap_points.get(self.options.initial_snap)?;
        Some(snap_target(measured(content_height)?, point))
    }

    /// Live offset that fully hides the sheet.
    ///
    /// Falls back to the viewport height while the content is unmeasured.
    pub fn closed_offset(&self, content_height: Option<f32>) -> f32 {
        measured(content_height).unwrap_or(self.viewport_height)
    }

    /// Writes a frame produced by the animation primitive.
    ///
    /// Returns `false` (and leaves the offset untouched) while a drag gesture owns the offset.
    pub fn apply_animation_frame(&mut self, offset: f32) -> bool {
        if self.owner == OffsetOwner::Gesture {
            return false;
        }
        strace!(offset, "apply_animation_frame");
        self.offset = offset;
        true
    }

    pub fn context(&self) -> SheetContext<'_> {
        SheetContext {
            offset: self.offset,
            owner: self.owner,
            is_open: self.is_open,
            initial_snap: self.options.initial_snap,
            snap_points: &self.snap_points,
            indicator_rotation: self.indicator_rotation,
            callbacks: &self.callbacks,
            drag_enabled: self.drag_enabled(),
            viewport_height: self.viewport_height,
            root_id: self.options.root_id.as_deref(),
        }
    }

    /// Returns a lightweight snapshot of the live state.
    pub fn state(&self) -> SheetState {
        SheetState {
            offset: self.offset,
            is_open: self.is_open,
            indicator_rotation: self.indicator_rotation,
        }
    }

    /// Restores the live offset and indicator from a snapshot.
    ///
    /// The open state stays host-controlled and is not restored. Returns `false` while a drag
    /// gesture owns the offset.
    pub fn restore_state(&mut self, state: SheetState) -> bool {
        if self.owner == OffsetOwner::Gesture {
            return false;
        }
        self.offset = state.offset;
        self.indicator_rotation = state.indicator_rotation;
        true
    }
}
