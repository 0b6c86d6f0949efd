/// Spring parameters forwarded to the animation primitive with every transition request.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            mass: 0.2,
        }
    }
}

/// Which role currently writes the live offset.
///
/// Exactly one writer exists at a time: the drag tracker while a gesture is active, the
/// animation primitive otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetOwner {
    #[default]
    Animation,
    Gesture,
}

/// How a resolved target offset is mapped back to a caller-facing snap index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexRecovery {
    /// Pick the snap point whose target (`content_height - point`) is closest to the offset.
    ///
    /// Works regardless of how the first snap point relates to the content height.
    #[default]
    Nearest,
    /// Round `|first_point - target|` and look it up by exact equality.
    ///
    /// Only correct when the first normalized snap point equals the content height; otherwise
    /// the lookup may fail and no index is reported.
    Exact,
}

/// How the host should render the sheet for the current lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Not mounted yet: render an inert placeholder.
    Placeholder,
    /// Mounted: render through the host's portal mechanism.
    Portal,
    /// Server rendering: render content directly, without portal or mount gating.
    Direct,
}

/// A request to (re)direct the animation primitive toward `target`.
///
/// A new request always supersedes one that is still in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapRequest {
    /// Target live offset (0 = fully open).
    pub target: f32,
    pub spring: SpringConfig,
    /// The snap index reported to `on_snap`, if any.
    pub index: Option<usize>,
    /// Whether this transition closes the sheet (`target >= content_height`).
    pub closes: bool,
}

/// Result of ending a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseOutcome {
    /// Released faster than the dismiss threshold; a close was requested.
    Dismissed,
    /// A transition toward a resolved target was requested.
    Snap(SnapRequest),
    /// Nothing happened: content height was unavailable or the session was stale.
    Skipped,
}

impl ReleaseOutcome {
    pub fn request(&self) -> Option<SnapRequest> {
        match self {
            Self::Snap(req) => Some(*req),
            _ => None,
        }
    }
}
