//! Sending callbacks.
//!
//! Handles: submit, cancel_send

use super::compose::current_draft;
use crate::AppWindow;
use certmailer::config::AppConfig;
use certmailer::dispatch::{prepare_batch, run_batch, DispatchReport, Progress, SimulatedMailer};
use certmailer::roster::RosterSlot;
use certmailer::state::AnnotationSurface;
use certmailer::DispatchError;
use futures::channel::mpsc;
use futures::StreamExt;
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancel flag of the batch in flight, if any.
pub type ActiveBatch = Rc<RefCell<Option<Arc<AtomicBool>>>>;

enum BatchEvent {
    Progress(Progress),
    Done(DispatchReport),
}

pub fn setup_dispatch_callbacks(
    ui: &AppWindow,
    surface: Rc<RefCell<AnnotationSurface>>,
    roster: Rc<RefCell<RosterSlot>>,
    config: Rc<RefCell<AppConfig>>,
    active: ActiveBatch,
) {
    setup_submit(ui, surface, roster, config, active.clone());
    setup_cancel_send(ui, active);
}

fn setup_submit(
    ui: &AppWindow,
    surface: Rc<RefCell<AnnotationSurface>>,
    roster: Rc<RefCell<RosterSlot>>,
    config: Rc<RefCell<AppConfig>>,
    active: ActiveBatch,
) {
    let ui_weak = ui.as_weak();
    ui.on_submit(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        if active.borrow().is_some() {
            ui.set_status_text(DispatchError::AlreadySending.to_string().into());
            return;
        }

        let config = config.borrow();
        let emails = match prepare_batch(
            roster.borrow().current(),
            &current_draft(&ui),
            &surface.borrow(),
            &config.email,
        ) {
            Ok(emails) => emails,
            Err(e) => {
                log::warn!("Submit rejected: {e}");
                ui.set_status_text(e.to_string().into());
                return;
            }
        };

        let cancel = Arc::new(AtomicBool::new(false));
        *active.borrow_mut() = Some(cancel.clone());
        ui.set_sending(true);
        log::info!("Sending {} email(s)", emails.len());

        let (tx, mut rx) = mpsc::unbounded();
        let mut mailer = SimulatedMailer::from_config(&config.dispatch);
        std::thread::spawn(move || {
            let progress_tx = tx.clone();
            let report = run_batch(&emails, &mut mailer, &cancel, |p| {
                let _ = progress_tx.unbounded_send(BatchEvent::Progress(p));
            });
            let _ = tx.unbounded_send(BatchEvent::Done(report));
        });

        let ui_weak = ui.as_weak();
        let batch_slot = active.clone();
        let task = slint::spawn_local(async move {
            let mut last = Progress::default();
            while let Some(event) = rx.next().await {
                let Some(ui) = ui_weak.upgrade() else { break };
                match event {
                    BatchEvent::Progress(p) => {
                        ui.set_progress(p.fraction());
                        ui.set_progress_label(p.label().into());
                        last = p;
                    }
                    BatchEvent::Done(report) => {
                        ui.set_sending(false);
                        ui.set_status_text(report.summary(last).into());
                        break;
                    }
                }
            }
            *batch_slot.borrow_mut() = None;
        });
        if let Err(e) = task {
            log::error!("Failed to track batch progress: {e}");
            *active.borrow_mut() = None;
            ui.set_sending(false);
        }
    });
}

fn setup_cancel_send(ui: &AppWindow, active: ActiveBatch) {
    let ui_weak = ui.as_weak();
    ui.on_cancel_send(move || {
        if let Some(cancel) = active.borrow().as_ref() {
            cancel.store(true, Ordering::Relaxed);
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_status_text("Cancelling...".into());
            }
        }
    });
}
