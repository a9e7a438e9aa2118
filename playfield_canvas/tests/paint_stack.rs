// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Save/restore behavior observed through the pixels a canvas produces.

use playfield_canvas::{Canvas, CanvasError, Color, Composite, Path};

fn pixel(canvas: &Canvas, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let p = canvas.pixmap().pixel(x, y).unwrap();
    (p.red(), p.green(), p.blue(), p.alpha())
}

#[test]
fn nested_frames_unwind_in_order() {
    let mut canvas = Canvas::new(30, 10).unwrap();
    canvas.set_fill_color(Color::from_rgba8(255, 0, 0, 255));

    canvas.save().set_fill_color(Color::from_rgba8(0, 255, 0, 255));
    canvas.save().set_fill_color(Color::from_rgba8(0, 0, 255, 255));
    canvas.fill_rect(20.0, 0.0, 10.0, 10.0).unwrap();
    canvas.restore().unwrap();
    canvas.fill_rect(10.0, 0.0, 10.0, 10.0).unwrap();
    canvas.restore().unwrap();
    canvas.fill_rect(0.0, 0.0, 10.0, 10.0).unwrap();

    assert_eq!(pixel(&canvas, 5, 5), (255, 0, 0, 255));
    assert_eq!(pixel(&canvas, 15, 5), (0, 255, 0, 255));
    assert_eq!(pixel(&canvas, 25, 5), (0, 0, 255, 255));
    assert_eq!(canvas.restore().unwrap_err(), CanvasError::UnbalancedRestore);
}

#[test]
fn clip_path_and_transform_share_a_frame() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.save().translate(10.0, 10.0);
    let mut triangle = Path::new();
    triangle.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(0.0, 10.0).close();
    canvas.clip(&triangle).unwrap();
    canvas.fill_rect(-10.0, -10.0, 20.0, 20.0).unwrap();
    canvas.restore().unwrap();

    // Inside the triangle, in device space.
    assert_eq!(pixel(&canvas, 11, 11).3, 255);
    // Same quadrant, outside the triangle.
    assert_eq!(pixel(&canvas, 18, 18).3, 0);
    // Other quadrants were clipped away.
    assert_eq!(pixel(&canvas, 5, 5).3, 0);
}

#[test]
fn composite_is_scoped_to_its_frame() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.fill_rect(0.0, 0.0, 10.0, 10.0).unwrap();

    canvas.save().set_composite(Composite::DstOut);
    canvas.fill_rect(0.0, 0.0, 5.0, 10.0).unwrap();
    canvas.restore().unwrap();
    canvas.fill_rect(0.0, 0.0, 2.0, 10.0).unwrap();

    assert_eq!(pixel(&canvas, 1, 5).3, 255);
    assert_eq!(pixel(&canvas, 3, 5).3, 0);
    assert_eq!(pixel(&canvas, 8, 5).3, 255);
    assert_eq!(canvas.paint_state().composite(), Composite::SrcOver);
}
