use snapsheet::SheetOptions;
use snapsheet_adapter::{Controller, SheetHandle};

fn main() {
    // Example: a controller driving the sheet with a spring, without holding any UI objects.
    //
    // An adapter would:
    // - forward pointer events to on_drag_start / on_drag / on_drag_end
    // - call tick(now_ms) in a frame loop and translate the panel by the returned offset
    // - hand a SheetHandle to the host for imperative snapping
    let options = SheetOptions::new()
        .with_snap_points([-50.0, 0.5, 120.0])
        .with_on_snap(Some(|i: usize| println!("on_snap({i})")))
        .with_on_open_end(Some(|| println!("on_open_end()")));

    let controller = Controller::new(options, 800.0).with_measure(|| Some(750.0));
    let handle = SheetHandle::new(controller);

    let mut now_ms = 0u64;
    handle.with(|c| {
        c.mount(now_ms);
        c.set_open(true, now_ms);
    });
    now_ms = settle(&handle, now_ms);

    // Drag down by 300px, then let go slowly.
    handle.with(|c| {
        c.on_drag_start();
        for _ in 0..10 {
            c.on_drag(30.0, 450.0);
        }
        let outcome = c.on_drag_end(80.0, now_ms);
        println!("released: {outcome:?}");
    });
    now_ms = settle(&handle, now_ms);

    handle.snap_to(0, now_ms);
    settle(&handle, now_ms);
}

fn settle(handle: &SheetHandle, mut now_ms: u64) -> u64 {
    loop {
        now_ms += 16;
        let Some(off) = handle.tick(now_ms) else {
            break;
        };
        if now_ms % 160 == 0 {
            println!("t={now_ms} off={off:.1}");
        }
    }
    println!("settled: t={now_ms} off={:?}", handle.offset());
    now_ms
}
