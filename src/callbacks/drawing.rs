//! Drawing callbacks for the name box.
//!
//! Handles: start_drawing, update_drawing, finish_drawing, cancel_drawing,
//! remove_box, render_box, fit_image

use crate::{AppWindow, BoxRect, FrameSize};
use certmailer::state::{AnnotationSurface, PixelRect, Point, Size};
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;

/// Sets up all drawing-related callbacks on the UI.
pub fn setup_drawing_callbacks(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    setup_start_drawing(ui, surface.clone());
    setup_update_drawing(ui, surface.clone());
    setup_finish_drawing(ui, surface.clone());
    setup_cancel_drawing(ui, surface.clone());
    setup_remove_box(ui, surface.clone());
    setup_render_box(ui, surface.clone());
    setup_fit_image(ui, surface);
}

/// Push surface flags to the window and force the overlay to re-render.
pub fn sync_surface(ui: &AppWindow, surface: &AnnotationSurface) {
    ui.set_has_image(surface.has_image());
    ui.set_drawing(surface.is_dragging());
    ui.set_box_revision(ui.get_box_revision().wrapping_add(1));
}

fn setup_start_drawing(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    let ui_weak = ui.as_weak();
    ui.on_start_drawing(move |x, y, width, height| {
        let mut state = surface.borrow_mut();
        if state.begin_drag(Point::new(x, y), Size::new(width, height)) {
            log::debug!("Drag started at ({x:.1}, {y:.1}) in {width:.0}x{height:.0}");
            if let Some(ui) = ui_weak.upgrade() {
                sync_surface(&ui, &state);
            }
        }
    });
}

fn setup_update_drawing(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    let ui_weak = ui.as_weak();
    ui.on_update_drawing(move |x, y, width, height| {
        let mut state = surface.borrow_mut();
        if state.update_drag(Point::new(x, y), Size::new(width, height)) {
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_box_revision(ui.get_box_revision().wrapping_add(1));
            }
        }
    });
}

fn setup_finish_drawing(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    let ui_weak = ui.as_weak();
    ui.on_finish_drawing(move || {
        let mut state = surface.borrow_mut();
        if !state.end_drag() {
            return;
        }
        if let Some(ui) = ui_weak.upgrade() {
            sync_surface(&ui, &state);
            let status = match state.image_region() {
                Some(r) => format!(
                    "Name box at {},{} ({}x{} px)",
                    r.x, r.y, r.width, r.height
                ),
                None => "Name box set".to_string(),
            };
            ui.set_status_text(status.into());
        }
    });
}

fn setup_cancel_drawing(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    let ui_weak = ui.as_weak();
    ui.on_cancel_drawing(move || {
        let mut state = surface.borrow_mut();
        if state.cancel_drag() {
            if let Some(ui) = ui_weak.upgrade() {
                sync_surface(&ui, &state);
                ui.set_status_text("Drawing cancelled".into());
            }
        }
    });
}

fn setup_remove_box(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    let ui_weak = ui.as_weak();
    ui.on_remove_box(move || {
        let mut state = surface.borrow_mut();
        if state.remove_box() {
            if let Some(ui) = ui_weak.upgrade() {
                sync_surface(&ui, &state);
                ui.set_status_text("Name box removed".into());
            }
        }
    });
}

fn setup_render_box(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    // The overlay lives inside the image frame, so the frame's origin is (0, 0).
    ui.on_render_box(move |width, height, _revision| {
        let Ok(state) = surface.try_borrow() else {
            return BoxRect::default();
        };
        match state.render_box(PixelRect::new(0.0, 0.0, width, height)) {
            Some(rect) => BoxRect {
                visible: true,
                x: rect.left,
                y: rect.top,
                width: rect.width,
                height: rect.height,
            },
            None => BoxRect::default(),
        }
    });
}

fn setup_fit_image(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    ui.on_fit_image(move |width, height, _revision| {
        let Ok(state) = surface.try_borrow() else {
            return FrameSize::default();
        };
        let fitted = state.fitted_size(Size::new(width, height));
        FrameSize {
            width: fitted.width,
            height: fitted.height,
        }
    });
}
