//! Target selection and snap index recovery.
//!
//! A normalized snap point `p` is a visible height; the live offset that shows it is
//! `content_height - p`. These helpers translate between the two spaces.

use crate::IndexRecovery;

fn distance(a: f32, b: f32) -> f32 {
    if a > b { a - b } else { b - a }
}

fn round_non_negative(value: f32) -> f32 {
    // Casting truncates toward zero, which is `floor` for non-negative input.
    (value + 0.5) as u64 as f32
}

/// Live offset that rests the sheet at a normalized snap point.
pub fn snap_target(content_height: f32, point: f32) -> f32 {
    content_height - point
}

/// Finds the snap target closest to `offset`.
///
/// Returns `(index, target)`. Ties resolve to the first candidate in sequence order.
pub fn nearest_snap_target(points: &[f32], content_height: f32, offset: f32) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32, f32)> = None;
    for (i, &p) in points.iter().enumerate() {
        let target = snap_target(content_height, p);
        let d = distance(target, offset);
        match best {
            Some((_, _, best_d)) if !(d < best_d) => {}
            _ => best = Some((i, target, d)),
        }
    }
    best.map(|(i, target, _)| (i, target))
}

/// Recovers a snap index by rounding `|first_point - target|` and looking it up exactly.
///
/// Only correct when `points[0]` equals the content height.
pub fn recover_index_exact(points: &[f32], target: f32) -> Option<usize> {
    let first = *points.first()?;
    let snap_value = round_non_negative(distance(first, target));
    points.iter().position(|&p| p == snap_value)
}

pub fn recover_index_nearest(points: &[f32], content_height: f32, target: f32) -> Option<usize> {
    nearest_snap_target(points, content_height, target).map(|(i, _)| i)
}

pub fn recover_index(
    policy: IndexRecovery,
    points: &[f32],
    content_height: f32,
    target: f32,
) -> Option<usize> {
    match policy {
        IndexRecovery::Nearest => recover_index_nearest(points, content_height, target),
        IndexRecovery::Exact => recover_index_exact(points, target),
    }
}
