use crate::error::{ErrorCode, VpnWatchError};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Process timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mock expectation not met: {0}")]
    MockExpectationNotMet(String),
}

impl ProcessError {
    /// The tool is missing rather than misbehaving
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProcessError::CommandNotFound(_))
    }
}

/// Convert ProcessError to VpnWatchError
impl From<ProcessError> for VpnWatchError {
    fn from(err: ProcessError) -> Self {
        let (code, tool) = match &err {
            ProcessError::CommandNotFound(cmd) => (ErrorCode::TOOL_UNAVAILABLE, Some(cmd.clone())),
            ProcessError::Timeout(_) => (ErrorCode::TOOL_TIMEOUT, None),
            ProcessError::Io(_) => (ErrorCode::TOOL_SPAWN_FAILED, None),
            ProcessError::MockExpectationNotMet(_) => (ErrorCode::TOOL_GENERIC, None),
        };

        VpnWatchError::tool_with_code(code, err.to_string(), tool).with_source(err)
    }
}
