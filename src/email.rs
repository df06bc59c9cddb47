//! Email draft and preview.

use crate::config::EmailConfig;
use crate::roster::Recipient;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// What the preview card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailPreview {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// A message ready for a `Mailer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub recipient_name: String,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Subject as sent: the typed one, or the configured default when it is
    /// empty or only whitespace. The typed text is otherwise kept untrimmed.
    pub fn effective_subject<'a>(&'a self, config: &'a EmailConfig) -> &'a str {
        if self.subject.trim().is_empty() {
            &config.default_subject
        } else {
            &self.subject
        }
    }

    pub fn effective_body<'a>(&'a self, config: &'a EmailConfig) -> &'a str {
        if self.body.trim().is_empty() {
            &config.default_body
        } else {
            &self.body
        }
    }

    /// Preview for `recipient`, or for the configured fallback address when
    /// no roster is loaded. The name placeholder is only substituted when a
    /// recipient is known.
    pub fn preview(&self, recipient: Option<&Recipient>, config: &EmailConfig) -> EmailPreview {
        let subject = self.effective_subject(config);
        let body = self.effective_body(config);
        match recipient {
            Some(r) => EmailPreview {
                recipient: r.email.clone(),
                subject: fill_name(subject, &config.name_placeholder, &r.name),
                body: fill_name(body, &config.name_placeholder, &r.name),
            },
            None => EmailPreview {
                recipient: config.fallback_recipient.clone(),
                subject: subject.to_string(),
                body: body.to_string(),
            },
        }
    }

    pub fn personalize(&self, recipient: &Recipient, config: &EmailConfig) -> OutgoingEmail {
        let preview = self.preview(Some(recipient), config);
        OutgoingEmail {
            to: preview.recipient,
            recipient_name: recipient.name.clone(),
            subject: preview.subject,
            body: preview.body,
        }
    }
}

fn fill_name(text: &str, placeholder: &str, name: &str) -> String {
    if placeholder.is_empty() {
        text.to_string()
    } else {
        text.replace(placeholder, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Recipient {
        Recipient {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn blank_draft_previews_defaults() {
        let config = EmailConfig::default();
        let preview = EmailDraft::new("  ", "\n\t ").preview(None, &config);
        assert_eq!(preview.subject, "Your certificate awaits!");
        assert_eq!(preview.body, config.default_body);
        assert_eq!(preview.recipient, config.fallback_recipient);
    }

    #[test]
    fn placeholder_filled_for_recipient() {
        let config = EmailConfig::default();
        let draft = EmailDraft::new("For Full_Name", "Hi Full_Name, well done Full_Name");
        let out = draft.personalize(&ada(), &config);
        assert_eq!(out.to, "ada@example.com");
        assert_eq!(out.subject, "For Ada");
        assert_eq!(out.body, "Hi Ada, well done Ada");
    }

    #[test]
    fn padded_draft_is_kept_as_typed() {
        let config = EmailConfig::default();
        let preview = EmailDraft::new(" Hello ", "Hi\n").preview(None, &config);
        assert_eq!(preview.subject, " Hello ");
        assert_eq!(preview.body, "Hi\n");
    }

    #[test]
    fn default_body_greets_by_name() {
        let config = EmailConfig::default();
        let preview = EmailDraft::default().preview(Some(&ada()), &config);
        assert!(preview.body.starts_with("Hey Ada!"));
    }
}
