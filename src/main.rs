slint::include_modules!();

mod callbacks;
mod utils;

use callbacks::dispatch::ActiveBatch;
use certmailer::config::load_config;
use certmailer::roster::RosterSlot;
use certmailer::state::AnnotationSurface;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

fn main() -> Result<(), slint::PlatformError> {
    certmailer::logging::init();

    let ui = AppWindow::new()?;
    let config = Rc::new(RefCell::new(load_config()));
    let surface = Rc::new(RefCell::new(AnnotationSurface::new()));
    let roster = Rc::new(RefCell::new(RosterSlot::new()));
    let active_batch: ActiveBatch = Rc::new(RefCell::new(None));

    {
        let config = config.borrow();
        match utils::parse_color(&config.appearance.box_color) {
            Some(color) => ui.set_box_color(color),
            None => log::warn!("Ignoring invalid box color {:?}", config.appearance.box_color),
        }
        ui.set_box_stroke(config.appearance.box_stroke_width.max(1.0));
    }

    callbacks::drawing::setup_drawing_callbacks(&ui, surface.clone());
    callbacks::file_ops::setup_file_callbacks(&ui, surface.clone(), roster.clone(), config.clone());
    callbacks::compose::setup_compose_callbacks(&ui, roster.clone(), config.clone());
    callbacks::dispatch::setup_dispatch_callbacks(
        &ui,
        surface,
        roster.clone(),
        config.clone(),
        active_batch,
    );

    // Optional roster path as the first argument.
    if let Some(path) = std::env::args().nth(1) {
        callbacks::file_ops::accept_roster(&ui, &roster, &config, Path::new(&path));
    } else {
        ui.set_status_text("Upload a certificate image and a CSV roster to begin".into());
    }
    callbacks::compose::refresh_preview(&ui, &roster.borrow(), &config.borrow());

    ui.run()
}
