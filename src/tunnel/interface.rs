use crate::error::VpnWatchError;
use crate::subprocess::{ProcessError, ProcessOutput};
use serde::Serialize;

/// State of the tunnel interface as reported by `ip addr show`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InterfaceStatus {
    Up { details: String },
    NotFound,
    Failed { reason: String },
}

impl InterfaceStatus {
    pub fn from_output(output: &ProcessOutput) -> Self {
        if output.status.success() {
            InterfaceStatus::Up {
                details: output.stdout.trim().to_string(),
            }
        } else {
            InterfaceStatus::NotFound
        }
    }

    pub fn from_error(error: ProcessError) -> Self {
        let error = VpnWatchError::from(error);
        tracing::warn!("Interface check failed: {}", error);
        InterfaceStatus::Failed {
            reason: error.user_message(),
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, InterfaceStatus::Up { .. })
    }
}
