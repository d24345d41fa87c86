//! Reachability audits built on [`Prober`]
//!
//! [`exposure`] checks a WAN address from outside; [`connectivity`] checks
//! the tunnel from a connected client. Both fan probes out with bounded
//! concurrency and report results in declaration order.

pub mod connectivity;
pub mod exposure;

pub use connectivity::{ConnectivityReport, ConnectivityValidator, ServiceCheck};
pub use exposure::{ExposureAuditor, ExposureReport, PortCheck};

use crate::error::VpnWatchError;
use crate::probe::{ProbeOutcome, Prober};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::debug;

/// Probe every endpoint with at most `concurrency` attempts in flight.
///
/// `buffered` yields in input order, so `result[i]` belongs to
/// `endpoints[i]` whatever order the probes finish in.
pub(crate) async fn probe_all(
    prober: &dyn Prober,
    endpoints: &[(&str, u16)],
    timeout: Duration,
    concurrency: usize,
) -> Vec<ProbeOutcome> {
    let outcomes: Vec<ProbeOutcome> = stream::iter(endpoints.iter().copied())
        .map(|(host, port)| prober.probe(host, port, timeout))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    for error in failed_endpoints(endpoints, &outcomes) {
        debug!("E{:04}: {}", error.code(), error.user_message());
    }
    outcomes
}

/// One error per endpoint that did not answer, in declaration order
pub(crate) fn failed_endpoints(
    endpoints: &[(&str, u16)],
    outcomes: &[ProbeOutcome],
) -> Vec<VpnWatchError> {
    endpoints
        .iter()
        .zip(outcomes)
        .filter_map(|((host, port), outcome)| outcome.to_error(&format!("{host}:{port}")))
        .collect()
}
