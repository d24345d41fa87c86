//! Error handling utilities

use crate::error::{describe_error_code, VpnWatchError};
use tracing::error;

/// Exit status for an error that reached the top of a command
pub fn fatal_exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<VpnWatchError>()
        .map(VpnWatchError::exit_code)
        .unwrap_or(1)
}

/// Print a fatal error and exit with its status code
///
/// A `VpnWatchError` prints its user message, plus the full source chain
/// when `verbose >= 1`. Anything else prints its display form and exits 1.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    if let Some(vpn_err) = error.downcast_ref::<VpnWatchError>() {
        eprintln!("Error: {}", vpn_err.user_message());

        if verbose >= 1 {
            let code = vpn_err.code();
            eprintln!("\nE{:04}: {}", code, describe_error_code(code));
            eprintln!("Context Chain:\n{}", vpn_err.developer_message());
        }
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }
    }

    std::process::exit(fatal_exit_code(&error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::common;
    use std::path::Path;

    #[test]
    fn test_exit_code_comes_from_vpnwatch_error() {
        let config = anyhow::Error::new(common::config_not_found(Path::new("/etc/vpnwatch.toml")));
        assert_eq!(fatal_exit_code(&config), 2);

        let input = anyhow::Error::new(common::input_not_found(Path::new("/var/log/wg.log")));
        assert_eq!(fatal_exit_code(&input), 1);

        assert_eq!(fatal_exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
