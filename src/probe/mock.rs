use super::{ProbeOutcome, Prober};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Endpoint = (String, u16);

/// Scripted prober for tests.
///
/// Outcomes are keyed by host and port; unscripted endpoints are refused.
/// An optional per-endpoint delay lets tests finish probes out of order.
#[derive(Clone, Default)]
pub struct MockProber {
    outcomes: Arc<Mutex<HashMap<Endpoint, ProbeOutcome>>>,
    delays: Arc<Mutex<HashMap<Endpoint, Duration>>>,
    call_history: Arc<Mutex<Vec<Endpoint>>>,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(self, host: &str, port: u16, outcome: ProbeOutcome) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .insert((host.to_string(), port), outcome);
        self
    }

    pub fn with_delay(self, host: &str, port: u16, delay: Duration) -> Self {
        self.delays
            .lock()
            .unwrap()
            .insert((host.to_string(), port), delay);
        self
    }

    pub fn get_call_history(&self) -> Vec<(String, u16)> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn verify_called(&self, host: &str, port: u16, times: usize) -> bool {
        let history = self.call_history.lock().unwrap();
        history
            .iter()
            .filter(|(h, p)| h == host && *p == port)
            .count()
            == times
    }
}

#[async_trait]
impl Prober for MockProber {
    async fn probe(&self, host: &str, port: u16, _timeout: Duration) -> ProbeOutcome {
        let key = (host.to_string(), port);
        self.call_history.lock().unwrap().push(key.clone());

        let delay = self.delays.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.outcomes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or(ProbeOutcome::Unreachable)
    }
}
