#![cfg_attr(debug_assertions, allow(dead_code))]

use super::MailService;

/// Mail service used by release builds.
///
/// Delivery goes through the hosting platform's mail relay, which consumes
/// structured log records tagged with `service = "CloudMailService"`.
#[derive(Debug, Clone)]
pub struct CloudMailService {
    mail_to: String,
    mail_from: String,
}

impl CloudMailService {
    pub fn new(mail_to: impl Into<String>, mail_from: impl Into<String>) -> Self {
        Self {
            mail_to: mail_to.into(),
            mail_from: mail_from.into(),
        }
    }
}

impl MailService for CloudMailService {
    fn send(&self, subject: &str, body: &str) {
        tracing::info!(
            from = %self.mail_from,
            to = %self.mail_to,
            service = "CloudMailService",
            subject,
            body,
            "Mail sent"
        );
    }
}
