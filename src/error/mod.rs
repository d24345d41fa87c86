use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::{describe_error_code, ErrorCode};
pub use helpers::{common, ErrorExt};

/// The unified error type for vpnwatch
#[derive(Error, Debug)]
pub enum VpnWatchError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Log input error: {message}")]
    Input {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Probe error: {message}")]
    Probe {
        code: u16,
        message: String,
        endpoint: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] External tool error: {message}")]
    Tool {
        code: u16,
        message: String,
        tool: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl VpnWatchError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_GENERIC,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a configuration error with specific code and path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a log input error with specific code and path
    pub fn input_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Input {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a probe error with specific code
    pub fn probe_with_code(code: u16, message: impl Into<String>, endpoint: Option<String>) -> Self {
        Self::Probe {
            code,
            message: message.into(),
            endpoint,
            source: None,
        }
    }

    /// Create an external tool error with specific code
    pub fn tool_with_code(code: u16, message: impl Into<String>, tool: Option<String>) -> Self {
        Self::Tool {
            code,
            message: message.into(),
            tool,
            source: None,
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Input { source: src, .. }
            | Self::Probe { source: src, .. }
            | Self::Tool { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Input { message, .. }
            | Self::Probe { message, .. }
            | Self::Tool { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Attach the path of the file the error concerns
    pub fn with_path(mut self, new_path: impl Into<PathBuf>) -> Self {
        match &mut self {
            Self::Config { path, .. } | Self::Input { path, .. } => {
                *path = Some(new_path.into());
            }
            _ => {}
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Input { .. } | Self::Probe { .. } | Self::Tool { .. } | Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Input { code, .. }
            | Self::Probe { code, .. }
            | Self::Tool { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Whether this is the missing-log-file case
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Input { code, .. } if *code == ErrorCode::INPUT_NOT_FOUND)
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => {
                if let Some(p) = path {
                    format!("Configuration problem in {}: {}", p.display(), message)
                } else {
                    format!("Configuration problem: {}", message)
                }
            }
            Self::Input { message, path, .. } => {
                if let Some(p) = path {
                    format!("{}: {}", message, p.display())
                } else {
                    message.clone()
                }
            }
            Self::Probe {
                message, endpoint, ..
            } => {
                if let Some(ep) = endpoint {
                    format!("Probe of {} failed: {}", ep, message)
                } else {
                    format!("Probe failed: {}", message)
                }
            }
            Self::Tool { message, tool, .. } => {
                if let Some(t) = tool {
                    format!("'{}' failed: {}", t, message)
                } else {
                    format!("External tool error: {}", message)
                }
            }
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        out
    }
}

/// Type alias for Results using VpnWatchError
pub type Result<T> = std::result::Result<T, VpnWatchError>;

impl From<std::io::Error> for VpnWatchError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::INPUT_NOT_FOUND, "Log file not found"),
            ErrorKind::PermissionDenied => (
                ErrorCode::INPUT_PERMISSION_DENIED,
                "Permission denied reading log file",
            ),
            _ => (ErrorCode::INPUT_IO_ERROR, "Error reading log file"),
        };

        VpnWatchError::input_with_code(code, message, None).with_source(err)
    }
}

impl From<toml::de::Error> for VpnWatchError {
    fn from(err: toml::de::Error) -> Self {
        VpnWatchError::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, "Invalid TOML syntax", None)
            .with_source(err)
    }
}
