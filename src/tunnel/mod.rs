//! Local WireGuard tunnel inspection through the `ip` and `wg` tools

pub mod handshake;
pub mod interface;

pub use handshake::{handshake_lines, has_active_handshake, HandshakeStatus};
pub use interface::InterfaceStatus;

use crate::subprocess::{ProcessCommandBuilder, ProcessRunner};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct TunnelInspector {
    runner: Arc<dyn ProcessRunner>,
    tool_timeout: Duration,
}

impl TunnelInspector {
    pub fn new(runner: Arc<dyn ProcessRunner>, tool_timeout: Duration) -> Self {
        Self {
            runner,
            tool_timeout,
        }
    }

    /// `ip addr show <interface>`
    pub async fn interface_status(&self, interface: &str) -> InterfaceStatus {
        let command = ProcessCommandBuilder::new("ip")
            .args(["addr", "show", interface])
            .timeout(self.tool_timeout)
            .build();

        match self.runner.run(command).await {
            Ok(output) => InterfaceStatus::from_output(&output),
            Err(e) => {
                debug!("Interface check for {} could not run", interface);
                InterfaceStatus::from_error(e)
            }
        }
    }

    /// `wg show`
    pub async fn handshake_status(&self) -> HandshakeStatus {
        let command = ProcessCommandBuilder::new("wg")
            .arg("show")
            .timeout(self.tool_timeout)
            .build();

        match self.runner.run(command).await {
            Ok(output) => HandshakeStatus::from_output(&output),
            Err(e) => HandshakeStatus::from_error(e),
        }
    }
}
