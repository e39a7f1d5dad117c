use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Tellere for kjernen. Eies av `App` og deles med `Arc`; ingen globale.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub body_updates_total: IntCounter,
    pub hydrate_fallback_total: IntCounter,
    pub sessions_committed_total: IntCounter,
    pub remote_failures_total: IntCounter,
    pub validation_errors_total: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    let c = IntCounter::new(name, help).expect("valid counter name");
    registry
        .register(Box::new(c.clone()))
        .expect("counter registered once per registry");
    c
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            body_updates_total: counter(
                &registry,
                "strive_body_updates_total",
                "Accepted body weight updates",
            ),
            hydrate_fallback_total: counter(
                &registry,
                "strive_hydrate_fallback_total",
                "Persisted body entries that were corrupt and fell back to zero",
            ),
            sessions_committed_total: counter(
                &registry,
                "strive_sessions_committed_total",
                "Workout sessions appended to local history",
            ),
            remote_failures_total: counter(
                &registry,
                "strive_remote_failures_total",
                "Failed remote submissions and health checks",
            ),
            validation_errors_total: counter(
                &registry,
                "strive_validation_errors_total",
                "Rejected inputs",
            ),
            registry,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Tekstformat for /metrics-eksponering.
    pub fn gather_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if encoder.encode(&self.registry.gather(), &mut buf).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("body_updates_total", &self.body_updates_total.get())
            .field("sessions_committed_total", &self.sessions_committed_total.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        let m = Metrics::new();
        m.body_updates_total.inc();
        m.body_updates_total.inc();
        let text = m.gather_text();
        assert!(text.contains("strive_body_updates_total 2"), "{text}");
        assert!(text.contains("strive_remote_failures_total 0"));
    }

    #[test]
    fn separate_instances_do_not_share_counts() {
        let a = Metrics::new();
        let b = Metrics::new();
        a.sessions_committed_total.inc();
        assert_eq!(b.sessions_committed_total.get(), 0);
    }
}
