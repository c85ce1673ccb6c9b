//! Resolved configuration bundle.

/// Process-wide configuration resolved once before the bootstrap sequence runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Error-telemetry endpoint identifier. `None` when unset or blank.
    pub sentry_dsn: Option<String>,
    /// Environment label forwarded verbatim to telemetry.
    pub environment: Option<String>,
    /// Whether the offline caching worker should be registered.
    pub service_worker_enabled: bool,
}

impl AppConfig {
    /// Telemetry DSN when one is configured.
    #[must_use]
    pub fn telemetry_dsn(&self) -> Option<&str> {
        self.sentry_dsn.as_deref()
    }

    /// Environment label, if any.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn default_bundle_disables_everything() {
        let config = AppConfig::default();
        assert!(config.telemetry_dsn().is_none());
        assert!(config.environment().is_none());
        assert!(!config.service_worker_enabled);
    }
}
