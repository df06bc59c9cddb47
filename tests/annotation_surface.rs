// Name box annotation over a rendered certificate image.

use certmailer::state::{
    AnnotationSurface, DragState, ImageResource, NormPoint, PixelRect, Point, Size,
};

fn surface_with_image() -> AnnotationSurface {
    let mut surface = AnnotationSurface::new();
    surface.load_image(ImageResource::new("certificate.png", 1600, 800));
    surface
}

fn drag(surface: &mut AnnotationSurface, from: (f32, f32), to: (f32, f32), rendered: Size) {
    assert!(surface.begin_drag(Point::new(from.0, from.1), rendered));
    assert!(surface.update_drag(Point::new(to.0, to.1), rendered));
    assert!(surface.end_drag());
}

#[test]
fn drag_is_stored_normalized_and_rendered_back() {
    let mut surface = surface_with_image();
    let rendered = Size::new(400.0, 200.0);
    drag(&mut surface, (100.0, 50.0), (300.0, 150.0), rendered);

    let b = surface.final_box().unwrap();
    assert_eq!(b.start, NormPoint::new(0.25, 0.25));
    assert_eq!(b.end, NormPoint::new(0.75, 0.75));

    assert_eq!(
        surface.render_box(PixelRect::new(0.0, 0.0, 400.0, 200.0)),
        Some(PixelRect::new(100.0, 50.0, 200.0, 100.0))
    );
}

#[test]
fn box_scales_with_rendered_image() {
    let mut surface = surface_with_image();
    drag(&mut surface, (100.0, 50.0), (300.0, 150.0), Size::new(400.0, 200.0));

    assert_eq!(
        surface.render_box(PixelRect::new(0.0, 0.0, 800.0, 400.0)),
        Some(PixelRect::new(200.0, 100.0, 400.0, 200.0))
    );
}

#[test]
fn render_is_non_negative_in_every_direction() {
    let rendered = Size::new(400.0, 200.0);
    let center = (200.0, 100.0);
    let targets = [
        (0.0, 0.0),
        (400.0, 0.0),
        (0.0, 200.0),
        (400.0, 200.0),
        (200.0, 100.0),
        (-50.0, 500.0),
    ];
    for target in targets {
        let mut surface = surface_with_image();
        drag(&mut surface, center, target, rendered);
        let rect = surface
            .render_box(PixelRect::new(10.0, 10.0, 400.0, 200.0))
            .unwrap();
        assert!(rect.width >= 0.0 && rect.height >= 0.0, "{target:?} -> {rect:?}");
    }
}

#[test]
fn click_without_drag_is_zero_size_box() {
    let mut surface = surface_with_image();
    let rendered = Size::new(400.0, 200.0);
    assert!(surface.begin_drag(Point::new(40.0, 20.0), rendered));
    assert!(surface.end_drag());

    let b = surface.final_box().unwrap();
    assert!(b.is_zero_area());
    assert_eq!(
        surface.render_box(PixelRect::new(0.0, 0.0, 400.0, 200.0)),
        Some(PixelRect::new(40.0, 20.0, 0.0, 0.0))
    );
}

#[test]
fn out_of_bounds_pointer_is_clamped() {
    let mut surface = surface_with_image();
    drag(&mut surface, (-100.0, -10.0), (900.0, 250.0), Size::new(400.0, 200.0));

    let b = surface.final_box().unwrap();
    assert_eq!(b.start, NormPoint::new(0.0, 0.0));
    assert_eq!(b.end, NormPoint::new(1.0, 1.0));
}

#[test]
fn loading_new_image_clears_box() {
    let mut surface = surface_with_image();
    drag(&mut surface, (0.0, 0.0), (10.0, 10.0), Size::new(100.0, 100.0));
    assert!(surface.final_box().is_some());

    surface.load_image(ImageResource::new("other.png", 100, 100));
    assert_eq!(surface.current_box(), None);
    assert_eq!(surface.image().unwrap().width, 100);
}

#[test]
fn remove_image_clears_both_and_is_idempotent() {
    let mut surface = surface_with_image();
    drag(&mut surface, (0.0, 0.0), (10.0, 10.0), Size::new(100.0, 100.0));

    assert!(surface.remove_image());
    assert!(!surface.has_image());
    assert_eq!(surface.current_box(), None);

    assert!(!surface.remove_image());
    assert!(!surface.has_image());
}

#[test]
fn begin_drag_while_dragging_keeps_start() {
    let mut surface = surface_with_image();
    let rendered = Size::new(400.0, 200.0);
    assert!(surface.begin_drag(Point::new(100.0, 50.0), rendered));
    assert!(!surface.begin_drag(Point::new(300.0, 150.0), rendered));

    match surface.drag_state() {
        DragState::Dragging { start, .. } => assert_eq!(start, NormPoint::new(0.25, 0.25)),
        DragState::Idle => panic!("drag should still be active"),
    }
}

#[test]
fn update_and_end_without_drag_are_noops() {
    let mut surface = surface_with_image();
    assert!(!surface.update_drag(Point::new(1.0, 1.0), Size::new(10.0, 10.0)));
    assert!(!surface.end_drag());
    assert_eq!(surface.current_box(), None);
}

#[test]
fn remove_box_keeps_image_and_is_ignored_mid_drag() {
    let mut surface = surface_with_image();
    let rendered = Size::new(100.0, 100.0);
    drag(&mut surface, (0.0, 0.0), (10.0, 10.0), rendered);

    assert!(surface.begin_drag(Point::new(20.0, 20.0), rendered));
    assert!(!surface.remove_box());
    assert!(surface.current_box().is_some());
    surface.end_drag();

    assert!(surface.remove_box());
    assert!(!surface.remove_box());
    assert!(surface.has_image());
}

#[test]
fn next_drag_replaces_box() {
    let mut surface = surface_with_image();
    let rendered = Size::new(100.0, 100.0);
    drag(&mut surface, (0.0, 0.0), (10.0, 10.0), rendered);
    drag(&mut surface, (50.0, 50.0), (60.0, 70.0), rendered);

    let b = surface.final_box().unwrap();
    assert_eq!(b.start, NormPoint::new(0.5, 0.5));
    assert_eq!(b.end, NormPoint::new(0.6, 0.7));
}

#[test]
fn degenerate_render_size_does_not_start_drag() {
    let mut surface = surface_with_image();
    assert!(!surface.begin_drag(Point::new(1.0, 1.0), Size::new(0.0, 0.0)));
    assert!(!surface.is_dragging());
}

#[test]
fn escape_mid_drag_brings_back_previous_box() {
    let mut surface = surface_with_image();
    let rendered = Size::new(100.0, 100.0);
    drag(&mut surface, (10.0, 10.0), (40.0, 30.0), rendered);

    assert!(surface.begin_drag(Point::new(70.0, 70.0), rendered));
    assert!(surface.update_drag(Point::new(90.0, 90.0), rendered));
    assert!(surface.cancel_drag());

    let b = surface.final_box().unwrap();
    assert_eq!(b.start, NormPoint::new(0.1, 0.1));
    assert_eq!(b.end, NormPoint::new(0.4, 0.3));
    assert_eq!(
        surface.image_region(),
        Some(certmailer::state::ImageRegion { x: 160, y: 80, width: 480, height: 160 })
    );
}

#[test]
fn late_load_after_remove_image_is_dropped() {
    let mut surface = AnnotationSurface::new();
    let ticket = surface.request_load();
    assert!(!surface.remove_image());
    assert!(!surface.is_latest(ticket));
    assert!(!surface.complete_load(ticket, ImageResource::new("late.png", 10, 10)));
    assert!(!surface.has_image());
}

#[test]
fn frame_fits_certificate_into_canvas() {
    let mut surface = AnnotationSurface::new();
    assert_eq!(surface.fitted_size(Size::new(600.0, 384.0)), Size::default());
    surface.load_image(ImageResource::new("certificate.png", 1600, 800));
    assert_eq!(surface.fitted_size(Size::new(600.0, 384.0)), Size::new(600.0, 300.0));
    assert_eq!(surface.fitted_size(Size::new(1000.0, 300.0)), Size::new(600.0, 300.0));
}
