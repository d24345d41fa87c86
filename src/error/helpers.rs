use super::{ErrorCode, VpnWatchError};
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to VpnWatchError with context
    fn to_vpnwatch(self, context: impl Into<String>) -> Result<T, VpnWatchError>;

    /// Convert to VpnWatchError with specific error type
    fn to_config_error(self, message: impl Into<String>) -> Result<T, VpnWatchError>;
    fn to_input_error(self, message: impl Into<String>) -> Result<T, VpnWatchError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_vpnwatch(self, context: impl Into<String>) -> Result<T, VpnWatchError> {
        self.map_err(|e| VpnWatchError::other(context).with_source(e))
    }

    fn to_config_error(self, message: impl Into<String>) -> Result<T, VpnWatchError> {
        self.map_err(|e| VpnWatchError::config(message).with_source(e))
    }

    fn to_input_error(self, message: impl Into<String>) -> Result<T, VpnWatchError> {
        self.map_err(|e| {
            VpnWatchError::input_with_code(ErrorCode::INPUT_IO_ERROR, message, None).with_source(e)
        })
    }
}

/// Helper functions for common error scenarios
pub mod common {
    use super::*;
    use std::fmt::Display;

    /// The log file to analyze does not exist
    pub fn input_not_found(path: impl AsRef<Path>) -> VpnWatchError {
        VpnWatchError::input_with_code(
            ErrorCode::INPUT_NOT_FOUND,
            "Log file not found",
            Some(path.as_ref().to_path_buf()),
        )
    }

    /// An explicitly requested configuration file does not exist
    pub fn config_not_found(path: impl AsRef<Path>) -> VpnWatchError {
        VpnWatchError::config_with_code(
            ErrorCode::CONFIG_NOT_FOUND,
            "Configuration file not found",
            Some(path.as_ref().to_path_buf()),
        )
    }

    /// A required configuration field has no value
    pub fn missing_field(field: &str, hint: &str) -> VpnWatchError {
        VpnWatchError::config_with_code(
            ErrorCode::CONFIG_MISSING_REQUIRED,
            format!("'{}' is not set ({})", field, hint),
            None,
        )
    }

    /// A configuration value is outside its allowed range
    pub fn invalid_value(field: &str, reason: impl Display) -> VpnWatchError {
        VpnWatchError::config_with_code(
            ErrorCode::CONFIG_INVALID_VALUE,
            format!("'{}' {}", field, reason),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_ext_conversions() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::other("stream broke"));
        let err = result.to_input_error("Error reading log file").unwrap_err();
        assert_eq!(err.code(), ErrorCode::INPUT_IO_ERROR);

        let result: Result<(), std::io::Error> = Err(std::io::Error::other("bad"));
        let err = result.to_config_error("Cannot read config").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_GENERIC);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_common_helpers() {
        let err = common::input_not_found("/tmp/missing.log");
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Log file not found: /tmp/missing.log");

        let err = common::missing_field("scan.target", "set it in vpnwatch.toml");
        assert_eq!(err.code(), ErrorCode::CONFIG_MISSING_REQUIRED);
    }
}
