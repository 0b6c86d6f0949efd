use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_delta(&mut self) -> f32 {
        (self.next_u64() % 401) as f32 - 200.0
    }
}

#[derive(Clone, Default)]
struct Recorder {
    snaps: Arc<Mutex<Vec<usize>>>,
    closes: Arc<AtomicUsize>,
}

impl Recorder {
    fn attach(&self, options: SheetOptions) -> SheetOptions {
        let snaps = Arc::clone(&self.snaps);
        let closes = Arc::clone(&self.closes);
        options
            .with_on_snap(Some(move |i: usize| snaps.lock().unwrap().push(i)))
            .with_on_close(Some(move || {
                closes.fetch_add(1, Ordering::SeqCst);
            }))
    }

    fn snaps(&self) -> Vec<usize> {
        self.snaps.lock().unwrap().clone()
    }

    fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

fn sheet_at(options: SheetOptions, viewport_height: f32, offset: f32) -> Sheet {
    let mut sheet = Sheet::new(options, viewport_height);
    assert!(sheet.apply_animation_frame(offset));
    sheet
}

fn release(sheet: &mut Sheet, velocity_y: f32, content_height: Option<f32>) -> ReleaseOutcome {
    let session = sheet.drag_start().expect("drag enabled");
    sheet.drag_end(session, velocity_y, content_height)
}

#[test]
fn snap_points_are_normalized_against_viewport() {
    let sheet = Sheet::new(
        SheetOptions::new().with_snap_points([0.5, -100.0, 250.0]),
        800.0,
    );
    assert_eq!(sheet.snap_points(), &[400.0, 700.0, 250.0]);

    // Out-of-order values are kept as given, only reported.
    let v = sheet.snap_order_violation().unwrap();
    assert_eq!(v.index, 1);
    assert_eq!(sheet.snap_points()[1], 700.0);
}

#[test]
fn snap_order_is_only_checked_once_viewport_is_known() {
    let mut sheet = Sheet::new(SheetOptions::new().with_snap_points([1.0, 500.0]), 0.0);
    assert_eq!(sheet.snap_points(), &[0.0, 500.0]);
    assert_eq!(sheet.snap_order_violation(), None);

    sheet.set_viewport_height(800.0);
    assert_eq!(sheet.snap_points(), &[800.0, 500.0]);
    assert_eq!(sheet.snap_order_violation(), None);

    sheet.update_options(|o| o.snap_points = alloc::vec![0.25, 0.5]);
    assert_eq!(sheet.snap_points(), &[200.0, 400.0]);
    assert!(sheet.snap_order_violation().is_some());
}

#[test]
fn live_offset_starts_closed() {
    let sheet = Sheet::new(SheetOptions::new(), 640.0);
    assert_eq!(sheet.offset(), 640.0);
    assert_eq!(sheet.owner(), OffsetOwner::Animation);
    assert_eq!(sheet.closed_offset(None), 640.0);
    assert_eq!(sheet.closed_offset(Some(300.0)), 300.0);
}

#[test]
fn drag_never_moves_above_open_position() {
    let mut rng = Lcg::new(7);
    let mut sheet = sheet_at(SheetOptions::new(), 800.0, 100.0);
    let session = sheet.drag_start().unwrap();
    for _ in 0..2_000 {
        let delta = rng.gen_delta();
        assert!(sheet.drag_update(&session, delta, delta));
        assert!(sheet.offset() >= 0.0, "offset={}", sheet.offset());
    }
}

#[test]
fn drag_overshoot_downward_is_allowed() {
    let mut sheet = sheet_at(SheetOptions::new(), 800.0, 700.0);
    let session = sheet.drag_start().unwrap();
    sheet.drag_update(&session, 500.0, 100.0);
    assert_eq!(sheet.offset(), 1200.0);
}

#[test]
fn indicator_tilts_with_velocity_sign() {
    let mut sheet = sheet_at(SheetOptions::new(), 800.0, 200.0);
    let session = sheet.drag_start().unwrap();

    sheet.drag_update(&session, 5.0, 120.0);
    assert_eq!(sheet.indicator_rotation(), 10.0);

    // Zero velocity keeps the previous tilt.
    sheet.drag_update(&session, 0.0, 0.0);
    assert_eq!(sheet.indicator_rotation(), 10.0);

    sheet.drag_update(&session, -5.0, -40.0);
    assert_eq!(sheet.indicator_rotation(), -10.0);

    sheet.drag_end(session, 0.0, Some(400.0));
    assert_eq!(sheet.indicator_rotation(), 0.0);
}

#[test]
fn fast_release_dismisses_regardless_of_position() {
    for snap_points in [Vec::new(), alloc::vec![400.0, 200.0, 0.0]] {
        let rec = Recorder::default();
        let mut sheet = sheet_at(
            rec.attach(SheetOptions::new().with_snap_points(snap_points)),
            800.0,
            0.0,
        );
        let session = sheet.drag_start().unwrap();
        sheet.drag_update(&session, 1.0, 900.0);
        let outcome = sheet.drag_end(session, 501.0, None);

        assert_eq!(outcome, ReleaseOutcome::Dismissed);
        assert_eq!(rec.closes(), 1);
        assert!(rec.snaps().is_empty());
        assert_eq!(sheet.indicator_rotation(), 0.0);
        assert_eq!(sheet.owner(), OffsetOwner::Animation);
    }
}

#[test]
fn release_picks_nearest_snap_target() {
    let rec = Recorder::default();
    let mut sheet = sheet_at(
        rec.attach(SheetOptions::new().with_snap_points([400.0, 200.0, 0.0])),
        800.0,
        250.0,
    );

    let req = release(&mut sheet, 0.0, Some(400.0)).request().unwrap();
    assert_eq!(req.target, 200.0);
    assert_eq!(req.index, Some(1));
    assert!(!req.closes);
    assert_eq!(req.spring, SpringConfig::default());
    assert_eq!(rec.snaps(), [1]);
    assert_eq!(rec.closes(), 0);
}

#[test]
fn release_at_last_snap_point_closes() {
    let rec = Recorder::default();
    let mut sheet = sheet_at(
        rec.attach(SheetOptions::new().with_snap_points([400.0, 200.0, 0.0])),
        800.0,
        390.0,
    );

    let req = release(&mut sheet, -50.0, Some(400.0)).request().unwrap();
    assert_eq!(req.target, 400.0);
    assert!(req.closes);
    assert_eq!(rec.snaps(), [2]);
    assert_eq!(rec.closes(), 1);
}

#[test]
fn release_without_snap_points_uses_close_threshold() {
    let rec = Recorder::default();
    let mut sheet = sheet_at(rec.attach(SheetOptions::new()), 800.0, 190.0);
    let req = release(&mut sheet, 0.0, Some(300.0)).request().unwrap();
    assert_eq!(req.target, 300.0);
    assert!(req.closes);
    assert_eq!(req.index, None);
    assert_eq!(rec.closes(), 1);

    let rec = Recorder::default();
    let mut sheet = sheet_at(rec.attach(SheetOptions::new()), 800.0, 150.0);
    let req = release(&mut sheet, 0.0, Some(300.0)).request().unwrap();
    assert_eq!(req.target, 0.0);
    assert!(!req.closes);
    assert_eq!(rec.closes(), 0);
    assert!(rec.snaps().is_empty());
}

#[test]
fn release_without_measurement_is_a_no_op() {
    let rec = Recorder::default();
    let mut sheet = sheet_at(
        rec.attach(SheetOptions::new().with_snap_points([400.0, 0.0])),
        800.0,
        100.0,
    );
    let session = sheet.drag_start().unwrap();
    sheet.drag_update(&session, 20.0, 30.0);

    assert_eq!(sheet.drag_end(session, 0.0, None), ReleaseOutcome::Skipped);
    assert_eq!(sheet.offset(), 120.0);
    assert_eq!(sheet.indicator_rotation(), 0.0);
    assert_eq!(sheet.owner(), OffsetOwner::Animation);
    assert!(rec.snaps().is_empty());
    assert_eq!(rec.closes(), 0);

    assert_eq!(release(&mut sheet, 0.0, Some(0.0)), ReleaseOutcome::Skipped);
}

#[test]
fn index_recovery_round_trips_when_first_point_is_content_height() {
    let points = [600.0, 450.0, 200.0, 0.0];
    let content_height = 600.0;
    for (i, &p) in points.iter().enumerate() {
        let target = content_height - p;
        assert_eq!(mapper::recover_index_exact(&points, target), Some(i));
        assert_eq!(
            mapper::recover_index_nearest(&points, content_height, target),
            Some(i)
        );
    }
}

#[test]
fn exact_recovery_can_miss_and_skips_on_snap() {
    // The first point (300) is below the content height (400), so the anchor is off.
    let rec = Recorder::default();
    let mut sheet = sheet_at(
        rec.attach(
            SheetOptions::new()
                .with_snap_points([300.0, 200.0, 0.0])
                .with_index_recovery(IndexRecovery::Exact),
        ),
        800.0,
        390.0,
    );
    let req = release(&mut sheet, 0.0, Some(400.0)).request().unwrap();
    assert_eq!(req.target, 400.0);
    assert_eq!(req.index, None);
    assert!(rec.snaps().is_empty());
    // The close still happens.
    assert!(req.closes);
    assert_eq!(rec.closes(), 1);
}

#[test]
fn nearest_recovery_survives_anchor_mismatch() {
    let rec = Recorder::default();
    let mut sheet = sheet_at(
        rec.attach(SheetOptions::new().with_snap_points([300.0, 200.0, 0.0])),
        800.0,
        390.0,
    );
    let req = release(&mut sheet, 0.0, Some(400.0)).request().unwrap();
    assert_eq!(req.index, Some(2));
    assert_eq!(rec.snaps(), [2]);
}

#[test]
fn snap_to_matches_release_math() {
    let rec = Recorder::default();
    let mut sheet = sheet_at(
        rec.attach(SheetOptions::new().with_snap_points([400.0, 200.0, 0.0])),
        800.0,
        250.0,
    );
    let by_index = sheet.snap_to(1, Some(400.0)).unwrap();
    assert_eq!(by_index.target, 200.0);
    assert_eq!(by_index.index, Some(1));

    let by_release = release(&mut sheet, 0.0, Some(400.0)).request().unwrap();
    assert_eq!(by_index, by_release);
    assert_eq!(rec.snaps(), [1, 1]);

    let closing = sheet.snap_to(2, Some(400.0)).unwrap();
    assert!(closing.closes);
    assert_eq!(rec.closes(), 1);
    assert_eq!(rec.snaps(), [1, 1, 2]);
}

#[test]
fn snap_to_out_of_range_is_a_no_op() {
    let rec = Recorder::default();
    let mut sheet = sheet_at(
        rec.attach(SheetOptions::new().with_snap_points([400.0, 0.0])),
        800.0,
        123.0,
    );
    assert_eq!(sheet.snap_to(2, Some(400.0)), None);
    assert_eq!(sheet.snap_to(0, None), None);
    assert_eq!(sheet.offset(), 123.0);
    assert!(rec.snaps().is_empty());
    assert_eq!(rec.closes(), 0);

    let mut bare = Sheet::new(rec.attach(SheetOptions::new()), 800.0);
    assert_eq!(bare.snap_to(0, Some(400.0)), None);
}

#[test]
fn snap_to_takes_the_offset_back_from_a_gesture() {
    let mut sheet = sheet_at(
        SheetOptions::new().with_snap_points([400.0, 0.0]),
        800.0,
        100.0,
    );
    let session = sheet.drag_start().unwrap();
    sheet.drag_update(&session, 10.0, 10.0);
    assert!(!sheet.apply_animation_frame(50.0));

    sheet.snap_to(0, Some(400.0)).unwrap();
    assert_eq!(sheet.owner(), OffsetOwner::Animation);
    assert_eq!(sheet.indicator_rotation(), 0.0);
    assert!(!sheet.drag_update(&session, 10.0, 10.0));
    assert_eq!(sheet.drag_end(session, 0.0, Some(400.0)), ReleaseOutcome::Skipped);
    assert!(sheet.apply_animation_frame(50.0));
}

#[test]
fn stale_sessions_are_rejected() {
    let mut sheet = sheet_at(SheetOptions::new(), 800.0, 100.0);
    let first = sheet.drag_start().unwrap();
    let second = sheet.drag_start().unwrap();
    assert_ne!(first, second);

    assert!(!sheet.drag_update(&first, 10.0, 1.0));
    assert_eq!(sheet.offset(), 100.0);
    assert_eq!(sheet.drag_end(first, 0.0, Some(400.0)), ReleaseOutcome::Skipped);
    assert_eq!(sheet.owner(), OffsetOwner::Gesture);

    assert!(sheet.drag_update(&second, 10.0, 1.0));
    assert_eq!(sheet.offset(), 110.0);
}

#[test]
fn disabled_drag_hands_out_no_sessions() {
    let mut sheet = sheet_at(
        SheetOptions::new()
            .with_snap_points([400.0, 0.0])
            .with_disable_drag(true),
        800.0,
        0.0,
    );
    assert!(!sheet.drag_enabled());
    assert!(!sheet.context().drag_enabled);
    assert!(sheet.drag_start().is_none());
    assert_eq!(sheet.owner(), OffsetOwner::Animation);

    // Imperative control still works.
    assert_eq!(sheet.snap_to(0, Some(400.0)).unwrap().target, 0.0);
}

#[test]
fn open_state_changes_report_snap_index_once_mounted() {
    let rec = Recorder::default();
    let mut sheet = Sheet::new(
        rec.attach(
            SheetOptions::new()
                .with_snap_points([600.0, 400.0, 100.0])
                .with_initial_snap(1),
        ),
        800.0,
    );

    // Before mount nothing is reported.
    sheet.set_open(true);
    sheet.set_open(false);
    assert!(rec.snaps().is_empty());

    sheet.mount();
    sheet.set_open(true);
    assert_eq!(rec.snaps(), [1]);
    sheet.set_open(true);
    assert_eq!(rec.snaps(), [1]);
    sheet.set_open(false);
    assert_eq!(rec.snaps(), [1, 2]);

    // A render pass carrying a new `is_open` behaves the same.
    sheet.update_options(|o| o.is_open = true);
    assert_eq!(rec.snaps(), [1, 2, 1]);
    assert!(sheet.is_open());
}

#[test]
fn sheet_open_at_mount_reports_initial_snap() {
    let rec = Recorder::default();
    let mut sheet = Sheet::new(
        rec.attach(
            SheetOptions::new()
                .with_is_open(true)
                .with_snap_points([600.0, 400.0, 100.0])
                .with_initial_snap(2),
        ),
        800.0,
    );
    assert!(rec.snaps().is_empty());

    assert!(sheet.mount());
    assert_eq!(rec.snaps(), [2]);
    assert!(!sheet.mount());
    assert_eq!(rec.snaps(), [2]);

    sheet.set_open(false);
    assert_eq!(rec.snaps(), [2, 2]);

    let rec = Recorder::default();
    let mut closed = Sheet::new(
        rec.attach(SheetOptions::new().with_snap_points([600.0, 400.0])),
        800.0,
    );
    assert!(closed.mount());
    assert!(rec.snaps().is_empty());
}

#[test]
fn open_state_changes_without_snap_points_report_nothing() {
    let rec = Recorder::default();
    let mut sheet = Sheet::new(rec.attach(SheetOptions::new()), 800.0);
    sheet.mount();
    sheet.set_open(true);
    sheet.set_open(false);
    assert!(rec.snaps().is_empty());
}

#[test]
fn callback_cell_keeps_identity_and_sees_latest_hooks() {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let mut sheet = Sheet::new(
        SheetOptions::new().with_on_open_start(Some({
            let hits = Arc::clone(&hits);
            move || hits.lock().unwrap().push("first")
        })),
        800.0,
    );
    let cell = sheet.callbacks().clone();
    cell.fire_open_start();

    sheet.update_options(|o| {
        let hits = Arc::clone(&hits);
        o.on_open_start = Some(Arc::new(move || hits.lock().unwrap().push("second")));
    });
    assert!(cell.ptr_eq(sheet.callbacks()));
    assert!(cell.ptr_eq(sheet.context().callbacks));
    cell.fire_open_start();
    cell.fire_close_end();

    assert_eq!(*hits.lock().unwrap(), ["first", "second"]);
}

#[test]
fn render_mode_follows_mount_and_ssr() {
    let mut sheet = Sheet::new(SheetOptions::new(), 800.0);
    assert_eq!(sheet.render_mode(), RenderMode::Placeholder);
    sheet.mount();
    assert!(sheet.is_mounted());
    assert_eq!(sheet.render_mode(), RenderMode::Portal);

    let ssr = Sheet::new(SheetOptions::new().with_ssr(true), 0.0);
    assert_eq!(ssr.render_mode(), RenderMode::Direct);
}

#[test]
fn open_target_uses_initial_snap() {
    let sheet = Sheet::new(
        SheetOptions::new()
            .with_snap_points([0.75, 0.5])
            .with_initial_snap(1),
        800.0,
    );
    assert_eq!(sheet.open_target(Some(600.0)), Some(200.0));
    assert_eq!(sheet.open_target(None), None);
    assert_eq!(Sheet::new(SheetOptions::new(), 800.0).open_target(None), Some(0.0));
}

#[test]
fn context_exposes_shared_state() {
    let sheet = Sheet::new(
        SheetOptions::new()
            .with_snap_points([0.5])
            .with_root_id(Some("app-root"))
            .with_is_open(true),
        800.0,
    );
    let ctx = sheet.context();
    assert_eq!(ctx.snap_points, &[400.0]);
    assert_eq!(ctx.root_id, Some("app-root"));
    assert!(ctx.is_open);
    assert_eq!(ctx.offset, 800.0);
    assert_eq!(ctx.viewport_height, 800.0);
}

#[test]
fn state_can_be_restored_between_gestures() {
    let mut sheet = sheet_at(SheetOptions::new(), 800.0, 320.0);
    let state = sheet.state();
    assert_eq!(state.offset, 320.0);

    sheet.apply_animation_frame(10.0);
    assert!(sheet.restore_state(state));
    assert_eq!(sheet.offset(), 320.0);

    let _session = sheet.drag_start().unwrap();
    assert!(!sheet.restore_state(SheetState::default()));
    assert_eq!(sheet.offset(), 320.0);
}
