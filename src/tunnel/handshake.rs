use crate::error::VpnWatchError;
use crate::subprocess::{ProcessError, ProcessOutput};
use serde::Serialize;

const ACTIVE_MARKER: &str = "latest handshake";
const DETAIL_NEEDLES: [&str; 2] = ["handshake", "transfer"];

/// WireGuard peer handshake state as reported by `wg show`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HandshakeStatus {
    /// At least one peer has completed a handshake
    Active { lines: Vec<String> },
    Inactive,
    /// `wg show` exited non-zero, usually for lack of root
    Denied,
    ToolsMissing,
    Failed { reason: String },
}

impl HandshakeStatus {
    pub fn from_output(output: &ProcessOutput) -> Self {
        if !output.status.success() {
            return HandshakeStatus::Denied;
        }
        if has_active_handshake(&output.stdout) {
            HandshakeStatus::Active {
                lines: handshake_lines(&output.stdout),
            }
        } else {
            HandshakeStatus::Inactive
        }
    }

    pub fn from_error(error: ProcessError) -> Self {
        let missing = error.is_not_found();
        let error = VpnWatchError::from(error);
        tracing::warn!("Handshake check failed: {}", error);
        if missing {
            HandshakeStatus::ToolsMissing
        } else {
            HandshakeStatus::Failed {
                reason: error.user_message(),
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, HandshakeStatus::Active { .. })
    }
}

/// Case-sensitive, like the `wg` output it scans
pub fn has_active_handshake(stdout: &str) -> bool {
    stdout.contains(ACTIVE_MARKER)
}

/// Lines mentioning a handshake or transfer counters, trimmed
pub fn handshake_lines(stdout: &str) -> Vec<String> {
    stdout
        .split('\n')
        .filter(|line| {
            let lower = line.to_lowercase();
            DETAIL_NEEDLES.iter().any(|needle| lower.contains(needle))
        })
        .map(|line| line.trim().to_string())
        .collect()
}
