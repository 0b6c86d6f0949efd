// Example: drive the engine by hand, without an animation primitive.
use snapsheet::{ReleaseOutcome, Sheet, SheetOptions};

fn main() {
    let viewport_height = 800.0;
    let content_height = Some(600.0);

    let options = SheetOptions::new()
        .with_snap_points([600.0, 0.5, 100.0])
        .with_initial_snap(1)
        .with_on_snap(Some(|i: usize| println!("on_snap({i})")))
        .with_on_close(Some(|| println!("on_close()")));

    let mut sheet = Sheet::new(options, viewport_height);
    sheet.mount();
    println!("snap_points={:?}", sheet.snap_points());

    sheet.set_open(true);
    let open_at = sheet.open_target(content_height).unwrap_or(0.0);
    // Without an animation primitive, jump straight to the target.
    sheet.apply_animation_frame(open_at);
    println!("opened at offset={}", sheet.offset());

    let session = sheet.drag_start().expect("drag is enabled");
    for _ in 0..10 {
        sheet.drag_update(&session, 30.0, 240.0);
    }
    println!(
        "dragged to offset={} tilt={}",
        sheet.offset(),
        sheet.indicator_rotation()
    );

    match sheet.drag_end(session, 120.0, content_height) {
        ReleaseOutcome::Snap(req) => {
            println!("animate to {} (index={:?})", req.target, req.index);
            sheet.apply_animation_frame(req.target);
        }
        ReleaseOutcome::Dismissed => println!("dismissed"),
        ReleaseOutcome::Skipped => println!("not measured yet"),
    }

    if let Some(req) = sheet.snap_to(0, content_height) {
        sheet.apply_animation_frame(req.target);
    }
    println!("final state={:?}", sheet.state());
}
