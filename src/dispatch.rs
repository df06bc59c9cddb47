//! Sending a batch of certificate emails.
//!
//! Delivery itself is behind the [`Mailer`] trait. The only shipped mailer
//! is [`SimulatedMailer`], which waits and succeeds.

use crate::config::{DispatchConfig, EmailConfig};
use crate::email::{EmailDraft, OutgoingEmail};
use crate::error::DispatchError;
use crate::roster::Roster;
use crate::state::AnnotationSurface;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub sent: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(sent: usize, total: usize) -> Self {
        Self { sent, total }
    }

    /// Completed share in [0, 1]; zero for an empty batch.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            (self.sent.min(self.total) as f32) / self.total as f32
        }
    }

    pub fn label(&self) -> String {
        format!("{}/{} Mails Sent", self.sent, self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.sent >= self.total
    }
}

pub trait Mailer: Send {
    fn send(&mut self, email: &OutgoingEmail) -> Result<(), DispatchError>;
}

/// Stands in for a real delivery backend.
#[derive(Debug, Clone)]
pub struct SimulatedMailer {
    delay: Duration,
}

impl SimulatedMailer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(Duration::from_millis(config.simulated_delay_ms))
    }
}

impl Mailer for SimulatedMailer {
    fn send(&mut self, email: &OutgoingEmail) -> Result<(), DispatchError> {
        std::thread::sleep(self.delay);
        log::debug!("Simulated delivery to {}", email.to);
        Ok(())
    }
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: Vec<DispatchError>,
    pub cancelled: bool,
}

impl DispatchReport {
    /// One-line outcome for the status bar, given the last progress seen.
    pub fn summary(&self, last: Progress) -> String {
        if last.is_complete() && self.failed.is_empty() {
            return format!("All {} email(s) sent", last.total);
        }
        let mut text = format!("Delivered {} of {}", self.delivered, last.total);
        if !self.failed.is_empty() {
            text.push_str(&format!(", {} failed", self.failed.len()));
        }
        if self.cancelled {
            text.push_str(" (cancelled)");
        }
        text
    }
}

/// Build one message per recipient. A batch needs a roster with at least
/// one email address and a finalized name box on the certificate.
pub fn prepare_batch(
    roster: Option<&Roster>,
    draft: &EmailDraft,
    surface: &AnnotationSurface,
    config: &EmailConfig,
) -> Result<Vec<OutgoingEmail>, DispatchError> {
    let roster = roster.ok_or(DispatchError::NoRoster)?;
    let recipients = roster.recipients();
    if recipients.is_empty() {
        return Err(DispatchError::NoRecipients);
    }
    if surface.image_region().is_none() {
        return Err(DispatchError::NoNameBox);
    }
    Ok(recipients
        .iter()
        .map(|r| draft.personalize(r, config))
        .collect())
}

/// Send `emails` in order, reporting progress after each one. Checks
/// `cancel` before every message.
pub fn run_batch<M, F>(
    emails: &[OutgoingEmail],
    mailer: &mut M,
    cancel: &AtomicBool,
    mut on_progress: F,
) -> DispatchReport
where
    M: Mailer + ?Sized,
    F: FnMut(Progress),
{
    let total = emails.len();
    let mut report = DispatchReport::default();
    on_progress(Progress::new(0, total));

    for (i, email) in emails.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            log::info!("Batch cancelled after {i} of {total}");
            report.cancelled = true;
            break;
        }
        match mailer.send(email) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                log::warn!("{e}");
                report.failed.push(e);
            }
        }
        on_progress(Progress::new(i + 1, total));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_label_and_fraction() {
        let p = Progress::new(15, 45);
        assert_eq!(p.label(), "15/45 Mails Sent");
        assert!((p.fraction() - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(Progress::new(0, 0).fraction(), 0.0);
        assert!(!Progress::new(0, 0).is_complete());
        assert!(Progress::new(2, 2).is_complete());
    }

    #[test]
    fn summary_reflects_outcome() {
        let done = DispatchReport {
            delivered: 3,
            ..Default::default()
        };
        assert_eq!(done.summary(Progress::new(3, 3)), "All 3 email(s) sent");

        let cancelled = DispatchReport {
            delivered: 1,
            cancelled: true,
            ..Default::default()
        };
        assert_eq!(cancelled.summary(Progress::new(1, 3)), "Delivered 1 of 3 (cancelled)");

        let partial = DispatchReport {
            delivered: 1,
            failed: vec![DispatchError::Delivery {
                recipient: "b@x.org".into(),
                reason: "bounced".into(),
            }],
            cancelled: false,
        };
        assert_eq!(partial.summary(Progress::new(2, 2)), "Delivered 1 of 2, 1 failed");
    }
}
