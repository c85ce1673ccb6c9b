//! Client options and transaction sampling.

/// Fraction of transactions sampled for performance tracing.
pub const TRACES_SAMPLE_RATE: f64 = 0.1;

/// Integrations the reporter can enable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integration {
    /// Page-load and navigation performance tracing.
    BrowserTracing,
}

/// Options used to construct the error-reporting client.
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetryOptions {
    /// Ingestion DSN.
    pub dsn: String,
    /// Environment label, forwarded unchanged.
    pub environment: Option<String>,
    /// Enabled integrations.
    pub integrations: Vec<Integration>,
    /// Transaction sample rate in `[0, 1]`.
    pub traces_sample_rate: f64,
}

impl TelemetryOptions {
    /// Standard browser options: one tracing integration sampled at [`TRACES_SAMPLE_RATE`].
    #[must_use]
    pub fn browser(dsn: impl Into<String>, environment: Option<String>) -> Self {
        Self {
            dsn: dsn.into(),
            environment,
            integrations: vec![Integration::BrowserTracing],
            traces_sample_rate: TRACES_SAMPLE_RATE,
        }
    }

    /// Whether page-load tracing is enabled.
    #[must_use]
    pub fn tracing_enabled(&self) -> bool {
        self.integrations.contains(&Integration::BrowserTracing)
    }

    /// Sampler derived from the configured rate.
    #[must_use]
    pub fn sampler(&self) -> TracesSampler {
        TracesSampler::new(self.traces_sample_rate)
    }
}

/// Uniform transaction sampler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracesSampler {
    rate: f64,
}

impl TracesSampler {
    /// Build a sampler; the rate is clamped to `[0, 1]` and NaN disables sampling.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        Self { rate }
    }

    /// Effective rate.
    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.rate
    }

    /// Decide for a uniform roll in `[0, 1)`.
    #[must_use]
    pub fn sample(&self, roll: f64) -> bool {
        roll < self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_options_use_fixed_rate_and_tracing() {
        let options = TelemetryOptions::browser("https://k@h/1", Some("prod".into()));
        assert!((options.traces_sample_rate - 0.1).abs() < f64::EPSILON);
        assert_eq!(options.integrations, vec![Integration::BrowserTracing]);
        assert!(options.tracing_enabled());
        assert_eq!(options.environment.as_deref(), Some("prod"));
    }

    #[test]
    fn sampler_clamps_rate() {
        assert!((TracesSampler::new(4.0).rate() - 1.0).abs() < f64::EPSILON);
        assert!(TracesSampler::new(-1.0).rate().abs() < f64::EPSILON);
        assert!(TracesSampler::new(f64::NAN).rate().abs() < f64::EPSILON);
    }

    #[test]
    fn sampler_keeps_rolls_below_rate() {
        let sampler = TracesSampler::new(TRACES_SAMPLE_RATE);
        assert!(sampler.sample(0.0));
        assert!(sampler.sample(0.099));
        assert!(!sampler.sample(0.1));
        assert!(!sampler.sample(0.75));
        assert!(!TracesSampler::new(0.0).sample(0.0));
    }
}
