use super::{ProbeOutcome, Prober};
use async_trait::async_trait;
use std::io;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;

/// Probes with a real TCP connect; name resolution counts against the timeout
pub struct TcpProber;

impl TcpProber {
    /// Map a failed connect to an outcome
    fn classify_connect_error(err: &io::Error) -> ProbeOutcome {
        match err.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted => ProbeOutcome::Unreachable,
            io::ErrorKind::TimedOut => ProbeOutcome::TimedOut,
            _ => ProbeOutcome::ProbeError(err.to_string()),
        }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: &str, port: u16, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();

        let outcome = match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeOutcome::Reachable
            }
            Ok(Err(e)) => Self::classify_connect_error(&e),
            Err(_) => ProbeOutcome::TimedOut,
        };

        tracing::debug!(
            "Probed {}:{} in {:?}: {}",
            host,
            port,
            started.elapsed(),
            outcome
        );
        outcome
    }
}
