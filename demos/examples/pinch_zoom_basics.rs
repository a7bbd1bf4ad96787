// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch/pan basics.
//!
//! Drive a `GestureTransformController` with scripted touch sessions and print
//! the transform the host would render after each one.
//!
//! Run:
//! - `cargo run -p understory_demos --example pinch_zoom_basics`

use kurbo::{Point, Vec2};
use understory_demos::{pan, pinch, play};
use understory_gesture_transform::trace::TraceRecord;
use understory_gesture_transform::{GestureConfig, GestureTransformController, TraceRecorder};

fn main() {
    let mut controller = GestureTransformController::new(GestureConfig::default())
        .expect("default config is valid")
        .with_on_move(|patch| println!("  patch: {patch:?}"))
        .with_trace(TraceRecorder::new());
    controller.initialize();

    let sessions = [
        ("tap", pan(Point::new(50.0, 50.0), Vec2::ZERO, 0)),
        ("pinch out", pinch(Point::new(200.0, 200.0), 80.0, 240.0, 4)),
        ("pan right", pan(Point::new(100.0, 100.0), Vec2::new(60.0, 0.0), 3)),
        ("pinch in", pinch(Point::new(200.0, 200.0), 240.0, 120.0, 4)),
        (
            "pan up, unclaimed under legacy gating",
            pan(Point::new(100.0, 100.0), Vec2::new(0.0, -30.0), 3),
        ),
    ];

    for (name, frames) in &sessions {
        println!("{name}:");
        let claimed = play(&mut controller, frames);
        let transform = controller.transform();
        println!(
            "  claimed: {claimed}, scale: {:.3}, translate: ({:.2}, {:.2})",
            transform.scale,
            transform.translate_x(),
            transform.translate_y()
        );
        for op in transform.ops() {
            println!("    {op:?}");
        }
    }

    controller.teardown();

    let commits = controller
        .trace()
        .records()
        .iter()
        .filter(|r| matches!(r, TraceRecord::Committed(_)))
        .count();
    println!("Committed {commits} baselines.");
}
