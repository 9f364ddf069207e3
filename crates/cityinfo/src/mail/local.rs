#![cfg_attr(not(debug_assertions), allow(dead_code))]

use super::MailService;

/// Writes mails to the log instead of delivering them.
#[derive(Debug, Clone)]
pub struct LocalMailService {
    mail_to: String,
    mail_from: String,
}

impl LocalMailService {
    pub fn new(mail_to: impl Into<String>, mail_from: impl Into<String>) -> Self {
        Self {
            mail_to: mail_to.into(),
            mail_from: mail_from.into(),
        }
    }
}

impl MailService for LocalMailService {
    fn send(&self, subject: &str, body: &str) {
        tracing::info!(
            from = %self.mail_from,
            to = %self.mail_to,
            service = "LocalMailService",
            subject,
            body,
            "Mail sent"
        );
    }
}
