//! TCP reachability probing
//!
//! [`Prober`] is the seam between the audits and the network. Production code
//! uses [`TcpProber`]; tests script outcomes with [`MockProber`].

pub mod mock;
pub mod tcp;

pub use mock::MockProber;
pub use tcp::TcpProber;

use crate::error::{ErrorCode, VpnWatchError};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// What a single connection attempt observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The TCP handshake completed within the timeout
    Reachable,
    /// The endpoint refused or reset the connection
    Unreachable,
    /// Nothing answered before the timeout
    TimedOut,
    /// Any other fault, e.g. name resolution or no route
    ProbeError(String),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable)
    }

    /// Error code for the non-reachable outcomes
    pub fn error_code(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Reachable => None,
            ProbeOutcome::Unreachable => Some(ErrorCode::PROBE_REFUSED),
            ProbeOutcome::TimedOut => Some(ErrorCode::PROBE_TIMEOUT),
            ProbeOutcome::ProbeError(_) => Some(ErrorCode::PROBE_FAULT),
        }
    }

    /// Express a non-reachable outcome as an error for reporting
    pub fn to_error(&self, endpoint: &str) -> Option<VpnWatchError> {
        let code = self.error_code()?;
        let message = match self {
            ProbeOutcome::ProbeError(reason) => reason.clone(),
            other => other.to_string(),
        };
        Some(VpnWatchError::probe_with_code(
            code,
            message,
            Some(endpoint.to_string()),
        ))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Reachable => f.write_str("reachable"),
            ProbeOutcome::Unreachable => f.write_str("connection refused"),
            ProbeOutcome::TimedOut => f.write_str("timed out"),
            ProbeOutcome::ProbeError(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// Something that can attempt a bounded TCP connection
#[async_trait]
pub trait Prober: Send + Sync {
    /// Never fails: every fault is folded into the outcome
    async fn probe(&self, host: &str, port: u16, timeout: Duration) -> ProbeOutcome;
}
