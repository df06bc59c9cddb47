//! File operation callbacks.
//!
//! Handles: image upload/removal, roster upload, sample row, layout export

use super::compose::refresh_preview;
use super::drawing::sync_surface;
use crate::AppWindow;
use crate::utils::{format_sample_row, image_from_rgba};
use certmailer::config::{add_recent_roster, save_config, AppConfig};
use certmailer::layout::CertificateLayout;
use certmailer::roster::{Roster, RosterSlot};
use certmailer::state::{decode_image, AnnotationSurface, IMAGE_EXTENSIONS};
use certmailer::RosterError;
use futures::channel::oneshot;
use slint::ComponentHandle;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Sets up all file operation callbacks on the UI.
pub fn setup_file_callbacks(
    ui: &AppWindow,
    surface: Rc<RefCell<AnnotationSurface>>,
    roster: Rc<RefCell<RosterSlot>>,
    config: Rc<RefCell<AppConfig>>,
) {
    setup_upload_image(ui, surface.clone());
    setup_remove_image(ui, surface.clone());
    setup_upload_csv(ui, roster.clone(), config.clone());
    setup_view_sample_row(ui, roster);
    setup_export_layout(ui, surface);
}

fn setup_upload_image(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    let ui_weak = ui.as_weak();
    ui.on_upload_image(move || {
        let file = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .set_title("Upload Certificate Image")
            .pick_file();

        if let Some(path) = file {
            load_image_async(ui_weak.clone(), surface.clone(), path);
        }
    });
}

/// Decode on a worker thread and install the result on the UI thread.
/// A newer upload supersedes one still decoding.
pub fn load_image_async(
    ui_weak: slint::Weak<AppWindow>,
    surface: Rc<RefCell<AnnotationSurface>>,
    path: std::path::PathBuf,
) {
    let ticket = surface.borrow_mut().request_load();
    let (tx, rx) = oneshot::channel();
    let worker_path = path.clone();
    std::thread::spawn(move || {
        let _ = tx.send(decode_image(&worker_path));
    });

    let task = slint::spawn_local(async move {
        let Ok(result) = rx.await else {
            log::error!("Image decoder for {} exited without a result", path.display());
            return;
        };
        let Some(ui) = ui_weak.upgrade() else { return };
        match result {
            Ok(decoded) => {
                let (width, height) = (decoded.resource.width, decoded.resource.height);
                let mut state = surface.borrow_mut();
                if state.complete_load(ticket, decoded.resource) {
                    ui.set_certificate_image(image_from_rgba(&decoded.rgba, width, height));
                    sync_surface(&ui, &state);
                    ui.set_status_text(format!("Loaded {}", path.display()).into());
                    log::info!("Loaded certificate image {}", path.display());
                }
            }
            Err(e) => {
                log::error!("{e}");
                if surface.borrow().is_latest(ticket) {
                    ui.set_status_text(e.to_string().into());
                }
            }
        }
    });
    if let Err(e) = task {
        log::error!("Failed to schedule image load: {e}");
    }
}

fn setup_remove_image(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    let ui_weak = ui.as_weak();
    ui.on_remove_image(move || {
        let mut state = surface.borrow_mut();
        state.remove_image();
        if let Some(ui) = ui_weak.upgrade() {
            ui.set_certificate_image(slint::Image::default());
            sync_surface(&ui, &state);
            ui.set_status_text("Image removed".into());
        }
    });
}

fn setup_upload_csv(
    ui: &AppWindow,
    roster: Rc<RefCell<RosterSlot>>,
    config: Rc<RefCell<AppConfig>>,
) {
    let ui_weak = ui.as_weak();
    ui.on_upload_csv(move || {
        let file = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("All files", &["*"])
            .set_title("Upload Roster")
            .pick_file();

        if let (Some(path), Some(ui)) = (file, ui_weak.upgrade()) {
            accept_roster(&ui, &roster, &config, &path);
        }
    });
}

/// Validate and parse a roster file. On failure the previous roster stays
/// selected; an invalid file type raises a blocking alert.
pub fn accept_roster(
    ui: &AppWindow,
    roster: &RefCell<RosterSlot>,
    config: &RefCell<AppConfig>,
    path: &Path,
) {
    let result = {
        let mut slot = roster.borrow_mut();
        slot.offer_path(path, &config.borrow().roster).map(|r| {
            let name = r.source_name().to_string();
            let status = match r.recipients().len() {
                0 => format!(
                    "Loaded roster {name}: no recipients (columns: {})",
                    r.headers().join(", ")
                ),
                count => format!("Loaded roster {name}: {count} recipient(s)"),
            };
            (name, status)
        })
    };

    match result {
        Ok((name, status)) => {
            ui.set_csv_name(name.into());
            ui.set_sample_row_text("".into());
            ui.set_status_text(status.into());
            {
                let mut config = config.borrow_mut();
                add_recent_roster(&mut config, path.display().to_string());
                if let Err(e) = save_config(&config) {
                    log::warn!("Could not save config: {e}");
                }
            }
            refresh_preview(ui, &roster.borrow(), &config.borrow());
        }
        Err(e @ RosterError::InvalidFileType { .. }) => {
            log::warn!("{e}");
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title("Invalid file")
                .set_description("Please upload a valid CSV file.")
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }
        Err(e) => {
            log::error!("{}: {e}", path.display());
            ui.set_status_text(e.to_string().into());
        }
    }
}

fn setup_view_sample_row(ui: &AppWindow, roster: Rc<RefCell<RosterSlot>>) {
    let ui_weak = ui.as_weak();
    ui.on_view_sample_row(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let slot = roster.borrow();
        let text = match slot.current().map(Roster::sample_row) {
            Some(Some(row)) => format_sample_row(&row),
            Some(None) => "Roster has no data rows".to_string(),
            None => "Upload a CSV first".to_string(),
        };
        ui.set_sample_row_text(text.into());
    });
}

fn setup_export_layout(ui: &AppWindow, surface: Rc<RefCell<AnnotationSurface>>) {
    let ui_weak = ui.as_weak();
    ui.on_export_layout(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let layout = match CertificateLayout::from_surface(&surface.borrow()) {
            Ok(layout) => layout,
            Err(e) => {
                ui.set_status_text(format!("Export failed: {e}").into());
                return;
            }
        };

        let file = rfd::FileDialog::new()
            .add_filter("Layout JSON", &["json"])
            .set_file_name("layout.json")
            .set_title("Export Certificate Layout")
            .save_file();

        if let Some(path) = file {
            match layout.save(&path) {
                Ok(()) => {
                    let status = format!("Layout exported to {}", path.display());
                    ui.set_status_text(status.into());
                }
                Err(e) => {
                    log::error!("{e}");
                    ui.set_status_text(format!("Export failed: {e}").into());
                }
            }
        }
    });
}
