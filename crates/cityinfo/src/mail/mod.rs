//! Notification mail collaborator.
//!
//! Handlers only see the [`MailService`] trait. Debug builds wire in
//! [`LocalMailService`], release builds [`CloudMailService`].

mod cloud;
mod local;

#[cfg_attr(debug_assertions, allow(unused_imports))]
pub use cloud::CloudMailService;
#[cfg_attr(not(debug_assertions), allow(unused_imports))]
pub use local::LocalMailService;

/// Fire-and-forget notification sink.
pub trait MailService: Send + Sync {
    fn send(&self, subject: &str, body: &str);
}

#[cfg(test)]
pub use recording::RecordingMailService;
