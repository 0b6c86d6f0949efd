//! Snap point normalization.
//!
//! Snap points are configured relative to the viewport and normalized into absolute pixel
//! heights: the visible height of the sheet above the viewport's bottom edge at each rest state.

use alloc::vec::Vec;
use core::fmt;

/// Converts one raw snap specification into an absolute height.
///
/// - `0 < raw <= 1`: fraction of the viewport height.
/// - `raw < 0`: offset from the top of the viewport.
/// - otherwise: already absolute, returned unchanged.
///
/// No clamping is applied.
pub fn normalize_snap_point(raw: f32, viewport_height: f32) -> f32 {
    if raw > 0.0 && raw <= 1.0 {
        raw * viewport_height
    } else if raw < 0.0 {
        viewport_height + raw
    } else {
        raw
    }
}

pub fn normalize_snap_points(raw: &[f32], viewport_height: f32) -> Vec<f32> {
    raw.iter()
        .map(|&v| normalize_snap_point(v, viewport_height))
        .collect()
}

/// Normalized snap points that are not strictly descending.
///
/// This is a configuration warning: the sheet keeps using the points in the order given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapOrderViolation {
    /// Index of the first point that is not below its predecessor.
    pub index: usize,
    pub previous: f32,
    pub current: f32,
}

impl fmt::Display for SnapOrderViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "snap points must be in descending order: point {} ({}) is not below point {} ({})",
            self.index,
            self.current,
            self.index.saturating_sub(1),
            self.previous
        )
    }
}

impl core::error::Error for SnapOrderViolation {}

/// Checks that normalized snap points are strictly descending.
///
/// While the viewport height is unknown (`<= 0`) the points cannot be meaningfully normalized,
/// so the check is skipped.
pub fn check_snap_order(points: &[f32], viewport_height: f32) -> Result<(), SnapOrderViolation> {
    if viewport_height <= 0.0 {
        return Ok(());
    }
    for (index, pair) in points.windows(2).enumerate() {
        let (previous, current) = (pair[0], pair[1]);
        // Written as a negated `<` so NaN is reported too.
        if !(current < previous) {
            return Err(SnapOrderViolation {
                index: index + 1,
                previous,
                current,
            });
        }
    }
    Ok(())
}
