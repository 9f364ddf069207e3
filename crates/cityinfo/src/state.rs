//! Application state shared by all request handlers.
//!
//! The store is constructed once at startup and shared behind an `Arc`; every
//! request builds its own [`UnitOfWork`] over it.

use std::sync::Arc;

use cityinfo_core::storage::{CityStore, UnitOfWork};

use crate::config::Config;
use crate::mail::MailService;
use crate::mock_data::seed_cities;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Persistence adapter behind the repository port.
    pub store: Arc<dyn CityStore>,
    /// Notification collaborator.
    pub mail: Arc<dyn MailService>,
}

impl AppState {
    /// Creates a new AppState from its collaborators.
    pub fn build(store: Arc<dyn CityStore>, mail: Arc<dyn MailService>) -> Self {
        Self { store, mail }
    }

    /// Creates AppState from configuration, seeding demo data when enabled.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let store = create_store(config).await?;

        if config.seed_demo_data && store.list_cities().await?.is_empty() {
            seed_cities(store.as_ref()).await?;
        }

        Ok(Self::build(store, create_mail_service(config)))
    }

    /// A fresh unit of work for one request.
    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new(self.store.clone())
    }
}

#[cfg(feature = "sqlite")]
async fn create_store(config: &Config) -> Result<Arc<dyn CityStore>, anyhow::Error> {
    use crate::storage::SqliteStore;

    tracing::info!(path = %config.sqlite_path, "Using SQLite store");
    Ok(Arc::new(SqliteStore::new(&config.sqlite_path).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn create_store(_config: &Config) -> Result<Arc<dyn CityStore>, anyhow::Error> {
    use crate::storage::InMemoryStore;

    tracing::info!("Using in-memory store");
    Ok(Arc::new(InMemoryStore::new()))
}

#[cfg(debug_assertions)]
fn create_mail_service(config: &Config) -> Arc<dyn MailService> {
    Arc::new(crate::mail::LocalMailService::new(
        &config.mail_to,
        &config.mail_from,
    ))
}

#[cfg(not(debug_assertions))]
fn create_mail_service(config: &Config) -> Arc<dyn MailService> {
    Arc::new(crate::mail::CloudMailService::new(
        &config.mail_to,
        &config.mail_from,
    ))
}

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::mail::RecordingMailService;
    use crate::storage::InMemoryStore;

    impl Default for AppState {
        /// Creates an empty in-memory AppState with a recording mailer.
        fn default() -> Self {
            Self::build(
                Arc::new(InMemoryStore::new()),
                Arc::new(RecordingMailService::default()),
            )
        }
    }

    impl AppState {
        /// In-memory state seeded with the demo cities, plus a handle on the
        /// recording mailer.
        pub async fn seeded() -> (Self, Arc<RecordingMailService>) {
            let store = Arc::new(InMemoryStore::new());
            seed_cities(store.as_ref()).await.unwrap();
            let mail = Arc::new(RecordingMailService::default());
            (Self::build(store, mail.clone()), mail)
        }
    }
}
