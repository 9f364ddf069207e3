use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "cityinfo.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Recipient of notification mails (default: "admin@mycompany.com")
    pub mail_to: String,
    /// Sender of notification mails (default: "noreply@mycompany.com")
    pub mail_from: String,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Seed the store with demo cities on startup (default: true)
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "cityinfo.db")
    /// - `MAIL_TO` - Notification recipient (default: "admin@mycompany.com")
    /// - `MAIL_FROM` - Notification sender (default: "noreply@mycompany.com")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `SEED_DEMO_DATA` - Seed demo cities, `true`/`false` (default: true)
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "cityinfo.db".to_string()),
            mail_to: env::var("MAIL_TO").unwrap_or_else(|_| "admin@mycompany.com".to_string()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@mycompany.com".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config {
            sqlite_path: "test.db".to_string(),
            mail_to: "to@example.com".to_string(),
            mail_from: "from@example.com".to_string(),
            request_timeout_seconds: 30,
            seed_demo_data: false,
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("SQLITE_PATH");
        env::remove_var("MAIL_TO");
        env::remove_var("MAIL_FROM");
        env::remove_var("REQUEST_TIMEOUT_SECONDS");
        env::remove_var("SEED_DEMO_DATA");

        let config = Config::from_env();

        assert_eq!(config.sqlite_path, "cityinfo.db");
        assert_eq!(config.mail_to, "admin@mycompany.com");
        assert_eq!(config.mail_from, "noreply@mycompany.com");
        assert_eq!(config.request_timeout_seconds, 10);
        assert!(config.seed_demo_data);
    }
}
