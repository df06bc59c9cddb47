//! Email composition callbacks.

use crate::AppWindow;
use certmailer::config::AppConfig;
use certmailer::email::EmailDraft;
use certmailer::roster::RosterSlot;
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;

pub fn setup_compose_callbacks(
    ui: &AppWindow,
    roster: Rc<RefCell<RosterSlot>>,
    config: Rc<RefCell<AppConfig>>,
) {
    let ui_weak = ui.as_weak();
    ui.on_draft_edited(move || {
        if let Some(ui) = ui_weak.upgrade() {
            refresh_preview(&ui, &roster.borrow(), &config.borrow());
        }
    });
}

/// The draft as currently typed into the editor.
pub fn current_draft(ui: &AppWindow) -> EmailDraft {
    EmailDraft::new(ui.get_subject().to_string(), ui.get_body().to_string())
}

/// Re-render the preview card for the roster's first recipient.
pub fn refresh_preview(ui: &AppWindow, roster: &RosterSlot, config: &AppConfig) {
    let recipient = roster.current().and_then(|r| r.first_recipient());
    let preview = current_draft(ui).preview(recipient.as_ref(), &config.email);
    ui.set_preview_recipient(preview.recipient.into());
    ui.set_preview_subject(preview.subject.into());
    ui.set_preview_body(preview.body.into());
}
