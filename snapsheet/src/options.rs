use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{IndexRecovery, SpringConfig};

/// A callback without arguments (`on_close` and the open/close lifecycle hooks).
pub type SheetCallback = Arc<dyn Fn() + Send + Sync>;

/// A callback receiving the snap index the sheet is heading to.
pub type SnapCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Release velocity (px/s, downward) above which a release dismisses the sheet.
pub const DEFAULT_FAST_DISMISS_VELOCITY: f32 = 500.0;

/// Fraction of the content height past which a release closes a sheet without snap points.
pub const DEFAULT_CLOSE_THRESHOLD: f32 = 0.6;

/// Drag indicator tilt (degrees) while the sheet moves.
pub const DEFAULT_DRAG_INDICATOR_TILT: f32 = 10.0;

/// Configuration for [`crate::Sheet`].
///
/// Callbacks are stored in `Arc`s, so adapters can clone the options, change a few fields and
/// hand them back through `Sheet::set_options` on every render pass.
#[derive(Clone)]
pub struct SheetOptions {
    /// Host-controlled open state.
    pub is_open: bool,
    /// Raw snap specifications, most-open first.
    ///
    /// Each value is a fraction of the viewport height (`0 < v <= 1`), an offset from the top of
    /// the viewport (`v < 0`), or an absolute pixel height (anything else).
    pub snap_points: Vec<f32>,
    /// Index into `snap_points` the sheet opens at.
    pub initial_snap: usize,
    pub spring: SpringConfig,
    /// When set, no drag sessions can be started.
    pub disable_drag: bool,
    /// Server rendering: skip mount gating and render directly.
    pub ssr: bool,
    /// Opaque id of the host focus-trap root, passed through to the shared context.
    pub root_id: Option<String>,
    pub index_recovery: IndexRecovery,

    pub fast_dismiss_velocity: f32,
    pub close_threshold: f32,
    pub drag_indicator_tilt: f32,

    /// Asks the host to close the sheet.
    pub on_close: Option<SheetCallback>,
    pub on_snap: Option<SnapCallback>,
    pub on_open_start: Option<SheetCallback>,
    pub on_open_end: Option<SheetCallback>,
    pub on_close_start: Option<SheetCallback>,
    pub on_close_end: Option<SheetCallback>,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetOptions {
    pub fn new() -> Self {
        Self {
            is_open: false,
            snap_points: Vec::new(),
            initial_snap: 0,
            spring: SpringConfig::default(),
            disable_drag: false,
            ssr: false,
            root_id: None,
            index_recovery: IndexRecovery::default(),
            fast_dismiss_velocity: DEFAULT_FAST_DISMISS_VELOCITY,
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            drag_indicator_tilt: DEFAULT_DRAG_INDICATOR_TILT,
            on_close: None,
            on_snap: None,
            on_open_start: None,
            on_open_end: None,
            on_close_start: None,
            on_close_end: None,
        }
    }

    pub fn with_is_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn with_snap_points(mut self, snap_points: impl IntoIterator<Item = f32>) -> Self {
        self.snap_points = snap_points.into_iter().collect();
        self
    }

    pub fn with_initial_snap(mut self, initial_snap: usize) -> Self {
        self.initial_snap = initial_snap;
        self
    }

    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_disable_drag(mut self, disable_drag: bool) -> Self {
        self.disable_drag = disable_drag;
        self
    }

    pub fn with_ssr(mut self, ssr: bool) -> Self {
        self.ssr = ssr;
        self
    }

    pub fn with_root_id(mut self, root_id: Option<impl Into<String>>) -> Self {
        self.root_id = root_id.map(Into::into);
        self
    }

    pub fn with_index_recovery(mut self, index_recovery: IndexRecovery) -> Self {
        self.index_recovery = index_recovery;
        self
    }

    pub fn with_fast_dismiss_velocity(mut self, velocity: f32) -> Self {
        self.fast_dismiss_velocity = velocity;
        self
    }

    pub fn with_close_threshold(mut self, fraction: f32) -> Self {
        self.close_threshold = fraction;
        self
    }

    pub fn with_drag_indicator_tilt(mut self, degrees: f32) -> Self {
        self.drag_indicator_tilt = degrees;
        self
    }

    pub fn with_on_close(mut self, on_close: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_close = on_close.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_snap(mut self, on_snap: Option<impl Fn(usize) + Send + Sync + 'static>) -> Self {
        self.on_snap = on_snap.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_open_start(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_open_start = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_open_end(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_open_end = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_close_start(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_close_start = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_close_end(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_close_end = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for SheetOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SheetOptions")
            .field("is_open", &self.is_open)
            .field("snap_points", &self.snap_points)
            .field("initial_snap", &self.initial_snap)
            .field("spring", &self.spring)
            .field("disable_drag", &self.disable_drag)
            .field("ssr", &self.ssr)
            .field("root_id", &self.root_id)
            .field("index_recovery", &self.index_recovery)
            .field("fast_dismiss_velocity", &self.fast_dismiss_velocity)
            .field("close_threshold", &self.close_threshold)
            .field("drag_indicator_tilt", &self.drag_indicator_tilt)
            .finish_non_exhaustive()
    }
}
